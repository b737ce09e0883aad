use log::{error, info};

gflags::define! {
    --config: &str = "embers_config.toml"
}
gflags::define! {
    --log_filter: &str = "warn,embers=info"
}
gflags::define! {
    --run_for_ms: u64 = 3000
}
gflags::define! {
    --output: &str = "embers.png"
}
gflags::define! {
    -h, --help = false
}

fn get_field_config() -> embers::field_params::FieldParams {
    match embers::field_params::read_config_from_file(CONFIG.flag) {
        Ok(params) => params,
        Err(e) => {
            error!("Failed to parse config file({}): {:?}", CONFIG.flag, e);
            embers::field_params::get_config_from_default_file()
        }
    }
}

fn main() -> anyhow::Result<()> {
    gflags::parse();
    if HELP.flag {
        gflags::print_help_and_exit(0);
    }
    scrub_log::init_with_filter_string(LOG_FILTER.flag)
        .map_err(|e| anyhow::anyhow!("Failed to init logging: {:?}", e))?;

    let params = get_field_config();
    info!("Running with {:?}", params);

    let (ready_tx, ready_rx) = futures::channel::oneshot::channel();
    let mut canvas = Some(embers::canvas::Canvas::new(
        params.viewport_width,
        params.viewport_height,
    ));
    // The receiver is alive until launch returns.
    let _ = ready_tx.send(());
    let mut provider = || canvas.take();
    let handle = embers::readiness::launch(&mut provider, Some(ready_rx), params);
    std::thread::sleep(std::time::Duration::from_millis(RUN_FOR_MS.flag));

    let driver = match handle.stop() {
        Some(driver) => driver,
        None => anyhow::bail!("Ember loop did not shut down cleanly"),
    };
    info!(
        "Rendered {} frames, {} resets",
        driver.frames(),
        driver.resets()
    );
    let output = std::path::Path::new(OUTPUT.flag);
    driver.into_surface().save_png(output)?;
    info!("Wrote last frame to {:?}", output);
    Ok(())
}
