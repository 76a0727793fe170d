#[tokio::main]
async fn main() {
    clinic_safety::init_tracing();

    if let Err(e) = clinic_safety::run().await {
        tracing::error!("clinic-safety failed: {e}");
        std::process::exit(1);
    }
}
