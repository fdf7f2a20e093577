use anyhow::Context;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = shadowbox::default().context("failed to start shadowbox")?;
    app.run().context("shadowbox stopped with an error")?;

    log::info!("bye");
    Ok(())
}
