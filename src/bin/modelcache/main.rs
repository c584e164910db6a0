//! modelcache CLI - inspect containers and asset directories.

use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use modelcache::anim::{AnimationClip, Key, NodeChannel, NodeHierarchy, RawBone, Skin};
use modelcache::asset::{Asset, Mesh, ModelInfo, Texture};
use modelcache::cache::{load_model, AssetDir};
use modelcache::container;
use modelcache::core::{AssetKind, CURRENT_VERSION};
use modelcache::util::{Mat4, Quat, Vec3};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            _ => filtered_args.push(arg),
        }
    }
    init_logging(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let result = match filtered_args[0] {
        "info" | "i" => match filtered_args.get(1) {
            Some(path) => cmd_info(Path::new(path)),
            None => Err(missing_arg("info <file.object>")),
        },
        "dump" | "d" => match filtered_args.get(1) {
            Some(path) => cmd_dump(Path::new(path)),
            None => Err(missing_arg("dump <asset-dir>")),
        },
        "verify" => match filtered_args.get(1) {
            Some(path) => cmd_verify(Path::new(path)),
            None => Err(missing_arg("verify <asset-dir>")),
        },
        "sample" | "s" => {
            let time = filtered_args.get(1).map(|s| s.parse::<f64>()).transpose();
            match time {
                Ok(t) => cmd_sample(t.unwrap_or(0.0)),
                Err(e) => Err(anyhow::anyhow!("invalid time: {}", e)),
            }
        }
        "version" | "--version" | "-V" => {
            print_version();
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            // Assume it's a file path
            let path = Path::new(other);
            if path.is_dir() {
                cmd_dump(path)
            } else if path.is_file() {
                cmd_info(path)
            } else {
                eprintln!("Unknown command: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn missing_arg(usage: &str) -> anyhow::Error {
    anyhow::anyhow!("missing argument\nUsage: modelcache {}", usage)
}

fn print_version() {
    println!(
        "modelcache {} (container v{}, built {})",
        env!("CARGO_PKG_VERSION"),
        CURRENT_VERSION,
        env!("MODELCACHE_BUILD_DATE")
    );
}

fn print_help() {
    println!("modelcache - inspect asset containers");
    println!();
    println!("Usage: modelcache [options] <command> [args]");
    println!();
    println!("Commands:");
    println!("  i, info <file.object>   Show container header and metadata");
    println!("  d, dump <asset-dir>     Summarize every asset in a model directory");
    println!("  verify <asset-dir>      Load every asset, fail if any is unreadable");
    println!("  s, sample [seconds]     Sample a built-in two-bone clip");
    println!("  version                 Show version");
    println!("  h, help                 Show this help");
    println!();
    println!("Options:");
    println!("  -v, --verbose  Debug output");
    println!("  -vv, --trace   Trace output (very verbose)");
    println!("  -q, --quiet    Errors only");
    println!();
    println!("RUST_LOG overrides the log filter.");
}

fn cmd_info(path: &Path) -> Result<()> {
    tracing::debug!("reading {}", path.display());
    let file = container::read(path).with_context(|| format!("reading {}", path.display()))?;

    println!("File:     {}", path.display());
    println!("Type:     {}", file.tag_string());
    println!("Version:  {}", file.version);
    println!("Metadata: {} bytes", file.json.len());
    println!("Blob:     {} bytes", file.blob.len());
    println!();

    match serde_json::from_str::<serde_json::Value>(&file.json) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{}", file.json),
    }
    println!();

    match file.kind() {
        Some(AssetKind::Mesh) => {
            let mesh = Mesh::decode(&file)?;
            println!(
                "Mesh: {} vertices, {} triangles, material {}",
                mesh.vertices.len(),
                mesh.triangle_count(),
                mesh.material_index
            );
            println!("Bounds: {:?}", mesh.bounds);
        }
        Some(AssetKind::Texture) => {
            let tex = Texture::decode(&file)?;
            println!(
                "Texture: {}x{} {:?} ({}) {}",
                tex.width,
                tex.height,
                tex.format(),
                tex.kind,
                tex.path
            );
            if tex.width > 0 && tex.height > 0 {
                println!("Compression ratio: {:.2}", tex.pixels().len() as f64 / file.blob.len().max(1) as f64);
            }
        }
        Some(AssetKind::ModelInfo) => {
            let info = ModelInfo::decode(&file)?;
            println!("Model: {} meshes, {} textures", info.num_meshes, info.num_textures);
        }
        None => println!("Unknown container type"),
    }

    Ok(())
}

fn cmd_dump(path: &Path) -> Result<()> {
    let dir = AssetDir::new(path);
    let report = load_model(&dir).with_context(|| format!("loading {}", path.display()))?;
    let assets = &report.assets;

    println!("Asset dir: {}", path.display());
    println!();

    println!("Meshes ({}):", assets.meshes.len());
    let (mut total_verts, mut total_tris) = (0usize, 0usize);
    for (i, mesh) in assets.meshes.iter().enumerate() {
        total_verts += mesh.vertices.len();
        total_tris += mesh.triangle_count();
        println!(
            "  [{}] {:>8} verts {:>8} tris  material {}  size {:?}",
            i,
            mesh.vertices.len(),
            mesh.triangle_count(),
            mesh.material_index,
            mesh.bounds.size()
        );
    }
    println!("  total: {} vertices, {} triangles", total_verts, total_tris);
    println!();

    println!("Textures ({}):", assets.textures().len());
    for (i, tex) in assets.textures().iter().enumerate() {
        println!(
            "  [{}] {:>5}x{:<5} {:?}  {}  {}",
            i,
            tex.width,
            tex.height,
            tex.format(),
            tex.kind,
            tex.path
        );
    }

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped ({}):", report.skipped.len());
        for s in &report.skipped {
            println!("  {}: {}", s.path.display(), s.error);
        }
    }

    Ok(())
}

fn cmd_verify(path: &Path) -> Result<()> {
    let dir = AssetDir::new(path);
    let report = load_model(&dir).with_context(|| format!("loading {}", path.display()))?;

    for s in &report.skipped {
        eprintln!("FAIL {}: {}", s.path.display(), s.error);
    }
    if !report.skipped.is_empty() {
        bail!("{} of {} assets unreadable", report.skipped.len(), report.skipped.len()
            + report.assets.meshes.len()
            + report.assets.textures().len());
    }

    println!(
        "OK: {} meshes, {} textures",
        report.assets.meshes.len(),
        report.assets.textures().len()
    );
    Ok(())
}

/// Two-bone arm swinging 90 degrees over one second.
fn cmd_sample(time: f64) -> Result<()> {
    let mut nodes = NodeHierarchy::new();
    let root = nodes.push("root", Mat4::IDENTITY, None)?;
    let upper = nodes.push("upper", Mat4::from_translation(Vec3::Y), Some(root))?;
    nodes.push("lower", Mat4::from_translation(Vec3::Y), Some(upper))?;

    let bones = [
        RawBone { name: "upper".into(), offset: Mat4::from_translation(-Vec3::Y), weights: Vec::new() },
        RawBone { name: "lower".into(), offset: Mat4::from_translation(-2.0 * Vec3::Y), weights: Vec::new() },
    ];
    let skin = Skin::from_bones(0, &bones);

    let mut channel = NodeChannel::new("upper");
    channel.positions.push(Key::new(0.0, Vec3::Y));
    channel.rotations = vec![
        Key::new(0.0, Quat::IDENTITY),
        Key::new(12.5, Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
        Key::new(25.0, Quat::IDENTITY),
    ];
    let clips = [AnimationClip::new("swing", 25.0, 0.0, vec![channel])];

    let tick = clips[0].tick_at(time);
    println!("t = {:.3}s  tick = {:.3} / {}", time, tick, clips[0].duration);

    let matrices = skin.bone_transforms(time, &clips, 0, &mut nodes);
    for (name, m) in ["upper", "lower"].iter().zip(&matrices) {
        println!("{}:", name);
        for row in 0..4 {
            let r = m.row(row);
            println!("  [{:8.4} {:8.4} {:8.4} {:8.4}]", r.x, r.y, r.z, r.w);
        }
    }
    Ok(())
}
