use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy the sample picker config to OUT_DIR for include_str
    let config_src = Path::new("../fixtures/picker.json");
    let config_dest = Path::new(&out_dir).join("picker.json");
    if config_src.exists() {
        fs::copy(config_src, &config_dest).unwrap();
    } else {
        fs::write(&config_dest, "{}").unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/picker.json");
}
