use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let includes: &[&str] = &["./src/protos"];

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    tonic_build::configure()
        .file_descriptor_set_path(out_dir.join("console_service_descriptor.bin"))
        .build_client(false)
        .compile(&["./src/protos/console_service.proto"], includes)?;

    Ok(())
}
