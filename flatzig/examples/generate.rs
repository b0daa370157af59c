//! Example schema generation run writing Zig modules to disk.
//!
//! Run with: `cargo run --example generate`

use flatzig::prelude::*;

/// Builds a small two-file schema: weapons in one file, the root
/// monster table in the other.
fn example_schema() -> (Schema, Vec<Prelude>) {
    let mut schema = Schema::new();

    let mut sword = Object::table("Sword", "weapon.fbs");
    sword.add_field(Field::new("damage", 0, TypeDesc::new(BaseKind::I32)).with_default_int(10));
    schema.objects.push(sword);

    let mut weapon = Enum::new("Weapon", BaseKind::U8, "weapon.fbs");
    weapon.is_union = true;
    weapon.add_value(EnumVal::new("NONE", 0));
    weapon.add_value(EnumVal::with_payload(
        "Sword",
        1,
        TypeDesc::new(BaseKind::Obj(0)),
    ));
    schema.enums.push(weapon);

    let mut monster = Object::table("Monster", "monster.fbs");
    monster.add_field(Field::new("hp", 0, TypeDesc::new(BaseKind::I16)).with_default_int(100));
    monster.add_field(Field::new("name", 1, TypeDesc::new(BaseKind::Str)));
    monster.add_field(Field::new(
        "equipped_type",
        2,
        TypeDesc::new(BaseKind::UType(0)),
    ));
    monster.add_field(Field::new("equipped", 3, TypeDesc::new(BaseKind::Union(0))));
    schema.objects.push(monster);
    schema.root_table = Some(1);
    schema.file_ident = Some("MONS".to_string());

    let preludes = vec![
        Prelude::new("weapon.fbs", "weapon"),
        Prelude::new("monster.fbs", "monster"),
    ];
    (schema, preludes)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (schema, preludes) = example_schema();
    let opts = GeneratorOptions {
        output_directory: "generated".into(),
        file_extension: ".fb.zig".to_string(),
    };

    let files = generate_schema(&schema, &preludes, &opts)?;
    write_output(&files, &opts)?;

    for file in &files {
        println!(
            "[Generate] Wrote {} ({} bytes)",
            file.path.display(),
            file.contents.len()
        );
    }
    Ok(())
}
