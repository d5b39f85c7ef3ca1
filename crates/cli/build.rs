use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));

    // Only watch HEAD when building from a git checkout.
    if let Some(head) = manifest_dir
        .ancestors()
        .map(|dir| dir.join(".git").join("HEAD"))
        .find(|head| head.is_file())
    {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let commit = Command::new("git")
        .current_dir(&manifest_dir)
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=GIT_COMMIT_HASH={commit}");

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".into());
    println!("cargo:rustc-env=TARGET={target}");
}
