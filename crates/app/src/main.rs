//! Entry point for the flight demo.
//! Logging + CLI flags, model load, then hand off to the platform shell.

use anyhow::Result;
use wgpu;

const DEFAULT_MODEL_PATH: &str = "assets/plane.obj";

fn parse_backend_arg() -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    eprintln!("[warn] Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_model_arg() -> String {
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--model=") {
            return val.to_string();
        }
    }
    DEFAULT_MODEL_PATH.to_string()
}

fn parse_size_args() -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in std::env::args() {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(800).max(1);
    let hh = h.unwrap_or(800).max(1);
    (ww, hh)
}

fn print_controls() {
    log::info!("=== Flight Simulator Controls ===");
    log::info!("W/S: Increase/Decrease speed");
    log::info!("A/D: Turn left/right (yaw)");
    log::info!("Arrow Up/Down: Pitch up/down");
    log::info!("Arrow Left/Right: Roll left/right");
    log::info!("Mouse drag: Rotate view");
    log::info!("R: Reset camera and plane");
    log::info!("ESC: Exit");
    log::info!("=================================");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let chosen = parse_backend_arg();
    let model_path = parse_model_arg();
    let (width, height) = parse_size_args();
    log::info!(
        "Starting flight demo. Backend: {:?}, model='{}', window_size={}x{}",
        chosen,
        model_path,
        width,
        height
    );

    let model = asset::obj::load_obj_from_path(&model_path)?;
    if model.is_empty() {
        anyhow::bail!("Model is empty! Check if {model_path} exists and contains vertices.");
    }

    print_controls();

    platform::run(chosen, model, width, height)?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
