use anyhow::Result;

use flowsim_types::catalog::DatasetCatalog;

/// Execute the `datasets` command: list the built-in catalog.
pub fn execute() -> Result<()> {
    let catalog = DatasetCatalog::builtin();

    for dataset in catalog.datasets() {
        println!(
            "{}  ({}, ~{} rows)",
            dataset.id, dataset.format, dataset.estimated_rows
        );
        println!("    {}", dataset.description);
        let fields: Vec<String> = dataset
            .schema
            .iter()
            .map(|f| format!("{}:{}", f.name, f.field_type))
            .collect();
        println!("    fields: {}", fields.join(", "));
    }

    Ok(())
}
