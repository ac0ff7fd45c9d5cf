//! Save the first 30 samples of each Iris class as a tensor file.
//!
//! The run is configured through `IRIS_SUBSET_CONFIG` (a `.toml` or `.json`
//! file) and the `IRIS_SUBSET_*` overrides. Log verbosity follows `RUST_LOG`.

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    iris_subset::init().context("failed to initialize logging")?;

    let (config, source) =
        iris_subset::resolve_config().context("failed to resolve configuration")?;
    log::debug!("Configuration source: {:?}", source);

    let summary = iris_subset::run(&config).with_context(|| {
        format!(
            "failed to subsample {} into {}",
            config.source,
            config.output_path.display()
        )
    })?;

    println!("{}", summary.message());
    Ok(())
}
