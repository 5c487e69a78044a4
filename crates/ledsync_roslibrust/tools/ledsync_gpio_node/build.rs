use std::path::PathBuf;

const INTERFACE_PACKAGE: &str = "random_point_classifier";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed=AMENT_PREFIX_PATH");

    let mut search_paths = Vec::new();

    // Prefer the installed interface package so field sets stay in sync with the detector.
    if let Some(prefixes) = std::env::var_os("AMENT_PREFIX_PATH") {
        let candidates = std::env::split_paths(&prefixes)
            .map(|prefix| prefix.join("share").join(INTERFACE_PACKAGE))
            .filter(|path| path.is_dir());
        search_paths.extend(candidates);
    }

    if search_paths.is_empty() {
        let bundled = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?)
            .join("interfaces")
            .join(INTERFACE_PACKAGE);
        if !bundled.is_dir() {
            return Err(format!(
                "{INTERFACE_PACKAGE} not found in AMENT_PREFIX_PATH or {}",
                bundled.display()
            )
            .into());
        }
        search_paths.push(bundled);
    }

    let (source, dependent_paths) =
        roslibrust::codegen::find_and_generate_ros_messages_without_ros_package_path(search_paths)?;

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let dest_path = out_dir.join("messages.rs");
    std::fs::write(dest_path, source.to_string())?;

    for path in dependent_paths {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    Ok(())
}
