use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=src/api.rs");

    let out = PathBuf::from(std::env::var("OUT_DIR")?).join("api_handlers.rs");
    apigen_codegen::generate_file("src/api.rs", out, &Default::default())?;

    Ok(())
}
