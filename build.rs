#![allow(clippy::exit, clippy::unwrap_used)]
fn main() {
    // Linker scripts only apply to on-target builds; host builds (tests)
    // must stay free of xtensa link arguments.
    if std::env::var("CARGO_FEATURE_ESP32S3").is_err() {
        return;
    }

    if std::env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}
