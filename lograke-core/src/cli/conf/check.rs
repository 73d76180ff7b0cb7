use crate::conf::{ConfigError, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ logs dir: {}", cfg.logs_dir.display());
            println!("✔ reports dir: {}", cfg.reports_dir.display());
            println!("✔ max report size: {}", cfg.max_report_size);
            match cfg.errors_limit {
                Some(limit) => println!("✔ errors limit: {limit}"),
                None => println!("✔ errors limit: disabled"),
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError) {
    eprintln!("{err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidMaxReportSize => Some(
            "The report must be allowed to hold at least one endpoint.\n\
             \n\
             Example:\n\
             \n\
             {\"MAX_REPORT_SIZE\": 1000}",
        ),

        ConfigError::InvalidErrorsLimit { .. } => Some(
            "ERRORS_LIMIT is the highest tolerated share of unparsed lines, e.g. 0.1 for 10%.\n\
             \n\
             Use null to disable the check:\n\
             \n\
             {\"ERRORS_LIMIT\": null}",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
