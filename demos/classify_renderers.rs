//! Classify a handful of renderer strings seen in the field

use gpuprobe::classify;

fn main() {
    let renderers = [
        "Adreno (TM) 640",
        "Adreno (TM) 506",
        "Mali-G76",
        "Mali-T880",
        "PowerVR Rogue GE8320",
        "Intel(R) HD Graphics 620",
        "NVIDIA Tegra",
        "ANGLE (Google, Vulkan 1.3.0 (SwiftShader Device))",
    ];

    for renderer in renderers {
        let (vendor, model) = classify(renderer);
        println!("{:<52} -> {} / {}", renderer, vendor, model);
    }
}
