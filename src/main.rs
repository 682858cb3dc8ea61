use log::{error, info};
use refbounds::param;
use refbounds::run;
use std::env;
use std::process::exit;

fn main() {
    let args: Vec<String> = env::args().collect();
    let param_path = if args.len() > 1 {
        args[1].clone()
    } else {
        "param.yaml".to_string()
    };

    let param = match param::get(param_path.clone()) {
        Ok(param) => param,
        Err(e) => {
            eprintln!("Cannot load parameter file {}: {}", param_path, e);
            exit(1);
        }
    };

    let logger =
        flexi_logger::Logger::try_with_env_or_str(&param.general.log_level).unwrap_or_else(|e| {
            eprintln!("Invalid log level {}: {}", param.general.log_level, e);
            exit(1);
        });
    let logger = if param.general.log_base.is_empty() {
        logger
    } else {
        logger.log_to_file(
            flexi_logger::FileSpec::default()
                .basename(param.general.log_base.clone())
                .suffix(param.general.log_suffix.clone()),
        )
    };
    logger.start().expect("Logger failed to start");

    info!("refbounds starting with parameter file {}", param_path);

    match run(&param) {
        Ok(analysis) => {
            println!("{}", analysis.display_results(param.general.display_colorful));
            if !param.general.save_analysis.is_empty() {
                match analysis.save_json(&param.general.save_analysis) {
                    Ok(()) => info!("Analysis saved to {}", param.general.save_analysis),
                    Err(e) => {
                        error!(
                            "Could not save analysis to {}: {}",
                            param.general.save_analysis, e
                        );
                        exit(1);
                    }
                }
            }
        }
        Err(e) => {
            error!("Run failed: {}", e);
            exit(1);
        }
    }
}
