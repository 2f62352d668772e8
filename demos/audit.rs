//! Prints the access-mode table, the rendered wrapper header and the audit
//! report (as JSON with `--json`).
use metis_shim::access::{ENTRY_POINTS, WRAPPER_HEADER};
use metis_shim::audit::{self, ParseError};

fn main() -> Result<(), ParseError> {
    for entry in &ENTRY_POINTS {
        println!("{}", entry.name);
        for p in entry.params {
            println!("  {:<10} {:<10} {}", p.name, p.access.as_str(), p.scalar.c_name());
        }
    }
    println!("\n{WRAPPER_HEADER}");

    let report = audit::run()?;
    if std::env::args().any(|a| a == "--json") {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("cannot serialise report: {e}"),
        }
    } else {
        println!("{report}");
    }
    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
