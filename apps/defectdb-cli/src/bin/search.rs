use std::env;

use defectdb_cli::bootstrap;
use defectdb_query::{ListParams, QueryEngine};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: defectdb-search [--json] [key=value ...]");
        eprintln!("Example: defectdb-search item=wire category=machine sortField=process sortDirection=desc page=1 pageSize=5");
        std::process::exit(1);
    }
    let json = args.iter().any(|a| a == "--json");
    let pairs: Vec<(String, String)> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .filter_map(|a| a.split_once('=').map(|(k, v)| (k.to_string(), v.to_string())))
        .collect();

    let app = bootstrap()?;
    let state = ListParams::from_pairs(pairs)?.into_state(app.settings.query.default_page_size)?;
    let result = QueryEngine::new().run(&app.store, &state)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.summary());
    if let Some(message) = result.empty_state() {
        println!("\n  {message}");
        return Ok(());
    }
    let (start, _) = result.page.range();
    for (i, d) in result.page.items.iter().enumerate() {
        let severity = d.severity.map_or("-", |s| s.label());
        println!("\n  {}. [{}] {}  ({} / {})", start + i, d.id, d.failure_mode, d.category.label(), severity);
        println!("     process:  {}", d.process);
        if !d.dri.is_empty() { println!("     DRI:      {}", d.dri); }
        if !d.criteria_acceptance_limit.is_empty() { println!("     criteria: {}", d.criteria_acceptance_limit); }
        if !d.failure_analysis_root_cause.is_empty() { println!("     cause:    {}", d.failure_analysis_root_cause); }
        if !d.corrective_action.is_empty() { println!("     action:   {}", d.corrective_action); }
        let images = d.images().count();
        if images > 0 { println!("     images:   {images}"); }
    }
    let info = result.page.info;
    println!(
        "\nPage {} of {}  ({} per page; options {:?}){}{}",
        info.current_page,
        info.total_pages,
        info.page_size,
        app.settings.query.page_size_options,
        if info.has_previous() { "  [prev]" } else { "" },
        if info.has_next() { "  [next]" } else { "" },
    );
    Ok(())
}
