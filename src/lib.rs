pub mod analysis;
pub mod bootstrap;
pub mod bounds;
pub mod data;
pub mod param;
pub mod table;

use crate::analysis::{version_stamp, Analysis};
use crate::bounds::compute_bounds;
use crate::data::Data;
use crate::param::Param;
use crate::table::ConcordanceTable;
use chrono::Local;
use log::{debug, info};
use std::error::Error;

/// Load the dataset named by `param` (or the bundled pertussis dataset when
/// no path is set), tabulate it and compute the bounds.
pub fn run(param: &Param) -> Result<Analysis, Box<dyn Error>> {
    let mut data = if param.data.path.is_empty() {
        info!("No data path set, using the bundled pertussis dataset");
        Data::pertussis()
    } else {
        let mut data = Data::new();
        data.load_data(&param.data.path)?;
        data
    };
    if !param.data.classes.is_empty() {
        data.set_classes(param.data.classes.clone());
    }
    if param.data.inverse_classes {
        data.inverse_classes();
    }
    debug!("{:?}", data);

    Ok(run_on_data(&data, param))
}

/// Compute the bounds for an already loaded dataset.
pub fn run_on_data(data: &Data, param: &Param) -> Analysis {
    let start = std::time::Instant::now();
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();

    let table = ConcordanceTable::from_data(data);
    info!("Concordance table ({} samples):\n{}", table.total(), table);

    let bounds = compute_bounds(&table, param.reference.alpha, param.reference.beta);

    let stem = param
        .general
        .save_analysis
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("refbounds");

    Analysis {
        id: format!("{}_{}", stem, timestamp),
        timestamp,
        refbounds_version: version_stamp(),
        parameters: param.clone(),
        data: data.clone(),
        table,
        bounds,
        execution_time: start.elapsed().as_secs_f64(),
    }
}
