use defectdb_cli::bootstrap;

fn main() -> anyhow::Result<()> {
    let app = bootstrap()?;
    let stats = app.store.stats();
    println!("Defects Management\n==================");
    println!("Total defects:    {}", stats.total);
    println!("Active defects:   {}", stats.active);
    println!("Critical defects: {}", stats.critical);
    println!("\nCategory breakdown (4M):");
    for c in &stats.by_category {
        println!("  {:<9} {}", c.label, c.count);
    }
    println!("\nRecently updated:");
    for d in &stats.recent {
        println!("  {}  [{}] {}  ({})", d.updated_at.format("%Y-%m-%d"), d.id, d.failure_mode, d.process);
    }
    println!("\nFailure modes: {}", app.store.failure_modes().join(", "));
    Ok(())
}
