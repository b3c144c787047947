// Stamp the triagectl version into the binary for `--version`.

fn main() {
    // TRIAGE_VERSION from the environment wins over the crate version
    let version = match std::env::var("TRIAGE_VERSION") {
        Ok(v) if !v.trim().is_empty() => v,
        _ => env!("CARGO_PKG_VERSION").to_string(),
    };
    println!("cargo:rustc-env=TRIAGE_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=TRIAGE_VERSION");
}
