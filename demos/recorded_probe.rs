//! Probe a recorded context snapshot
//! Run with: cargo run --example recorded_probe -- fixtures/adreno630.json

use gpuprobe::{probe_recorded, ProbeError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "fixtures/adreno630.json".to_string());

    match probe_recorded(&path) {
        Ok(info) => {
            println!("GPU: {} {}", info.vendor, info.model);
            println!("  Renderer: {}", info.renderer_name);
            println!("  OpenGL ES {}.{}", info.major_version, info.minor_version);
            println!("  Max work group size: {:?}", info.max_work_group_size);
            println!("  Extensions: {}", info.extensions.len());
        }
        Err(ProbeError::Api { errors }) => {
            println!("Probe failed, GL reported {} error(s)", errors.len());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
