//! fbx-export - Export JSON node hierarchies to ASCII FBX.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use fbx_exporter::export::{ExportSettings, Exporter, SceneDescription, SourceNode};
use fbx_exporter::scene::Manager;
use fbx_exporter::core::ObjectId;
use tracing_subscriber::EnvFilter;

/// Default log filter per verbosity flag
const LOG_QUIET: &str = "error";
const LOG_INFO: &str = "info";
const LOG_DEBUG: &str = "debug";
const LOG_TRACE: &str = "trace";

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = LOG_INFO;
    let mut settings_path: Option<PathBuf> = None;
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => level = LOG_DEBUG,
            "-vv" | "--trace" => level = LOG_TRACE,
            "-q" | "--quiet" => level = LOG_QUIET,
            "--settings" => match iter.next() {
                Some(p) => settings_path = Some(PathBuf::from(p)),
                None => {
                    eprintln!("Error: --settings needs a file argument");
                    std::process::exit(1);
                }
            },
            _ => filtered_args.push(arg),
        }
    }
    init_logging(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let settings = match load_settings(settings_path.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let result = match filtered_args[0] {
        // Export command - write an .fbx file
        "export" | "e" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: fbx-export export <hierarchy.json> [out.fbx]");
                std::process::exit(1);
            }
            cmd_export(settings, filtered_args[1], filtered_args.get(2).copied())
        }

        // Tree command - show the source hierarchy
        "tree" | "t" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: fbx-export tree <hierarchy.json>");
                std::process::exit(1);
            }
            cmd_tree(filtered_args[1])
        }

        // Props command - dump node properties
        "props" | "p" => {
            if filtered_args.len() < 2 {
                eprintln!("Error: missing file argument");
                eprintln!("Usage: fbx-export props <hierarchy.json>");
                std::process::exit(1);
            }
            cmd_props(settings, filtered_args[1])
        }

        "settings" | "s" => cmd_settings(&settings),

        "version" | "--version" | "-V" => {
            println!(
                "fbx-export {} (built {} {})",
                env!("CARGO_PKG_VERSION"),
                env!("FBX_EXPORT_BUILD_DATE"),
                env!("FBX_EXPORT_BUILD_TIME")
            );
            Ok(())
        }

        "help" | "h" | "--help" | "-h" => {
            print_help();
            Ok(())
        }

        // Passing a .json file directly is equivalent to 'tree'
        path if path.ends_with(".json") => cmd_tree(path),

        other => {
            eprintln!("Unknown command: {}", other);
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    println!("fbx-export - Node hierarchy to FBX exporter");
    println!();
    println!("USAGE:");
    println!("    fbx-export [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    e, export <file> [out]        Export hierarchy to ASCII FBX");
    println!("    t, tree   <file>              Show the node hierarchy");
    println!("    p, props  <file>              Build the scene and dump node properties");
    println!("    s, settings                   Print effective settings");
    println!("    version                       Show version and build date");
    println!("    h, help                       Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose        Show debug output");
    println!("    -vv, --trace         Show trace output (very verbose)");
    println!("    -q, --quiet          Only show errors");
    println!("    --settings <file>    Read settings from <file>");
    println!();
    println!("EXAMPLES:");
    println!("    fbx-export export level.json              # Writes level.fbx");
    println!("    fbx-export export level.json out/a.fbx    # Explicit output");
    println!("    fbx-export -v props level.json            # Inspect properties");
    println!();
    println!("NOTES:");
    println!("    - RUST_LOG overrides the verbosity flags");
    println!("    - Passing a .json file directly is equivalent to 'tree'");
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<ExportSettings> {
    match path {
        Some(p) => ExportSettings::load_from(p)
            .with_context(|| format!("failed to read settings {}", p.display())),
        None => Ok(ExportSettings::load()),
    }
}

fn load_description(path: &str) -> anyhow::Result<SceneDescription> {
    tracing::debug!("reading hierarchy {}", path);
    SceneDescription::load(path).with_context(|| format!("failed to read {}", path))
}

/// `<basename>.fbx` next to the input, basename from the scene name or the file stem.
fn default_output(settings: &ExportSettings, input: &str, desc: &SceneDescription) -> PathBuf {
    let input = Path::new(input);
    let basename = if desc.name.is_empty() {
        input.file_stem().and_then(|s| s.to_str()).unwrap_or_default()
    } else {
        desc.name.as_str()
    };
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(settings.file_name(basename))
}

fn cmd_export(mut settings: ExportSettings, input: &str, output: Option<&str>) -> anyhow::Result<()> {
    let desc = load_description(input)?;
    let output = match output {
        Some(o) => PathBuf::from(o),
        None => default_output(&settings, input, &desc),
    };

    let mut exporter = Exporter::new(settings.clone());
    let count = exporter
        .export_description(&desc, &output)
        .with_context(|| format!("failed to export {}", output.display()))?;
    if count == 0 {
        bail!("{} contains no nodes", input);
    }
    println!("Exported {} nodes to {}", count, output.display());

    settings.last_file = Some(output);
    if let Err(e) = settings.save() {
        tracing::warn!("could not save settings: {}", e);
    }
    Ok(())
}

fn cmd_tree(input: &str) -> anyhow::Result<()> {
    let desc = load_description(input)?;
    let title = if desc.name.is_empty() { input } else { desc.name.as_str() };
    println!("{} ({} nodes)", title, desc.node_count());
    for node in &desc.nodes {
        print_tree(node, 1);
    }
    Ok(())
}

fn print_tree(node: &SourceNode, depth: usize) {
    let t = node.local_transform();
    println!(
        "{}{}  T({}, {}, {}) R({}, {}, {}) S({}, {}, {})",
        "  ".repeat(depth),
        node.name,
        t.translation.x,
        t.translation.y,
        t.translation.z,
        t.rotation.x,
        t.rotation.y,
        t.rotation.z,
        t.scaling.x,
        t.scaling.y,
        t.scaling.z
    );
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}

fn cmd_props(settings: ExportSettings, input: &str) -> anyhow::Result<()> {
    let desc = load_description(input)?;
    let mut manager = Manager::new();
    let mut exporter = Exporter::new(settings);
    let scene = exporter.build_scene(&mut manager, &desc.nodes)?;
    let root = manager.root_node(scene)?;
    for &node in manager.node_children(root)? {
        print_props(&manager, node, 0)?;
    }
    Ok(())
}

fn print_props(manager: &Manager, node: ObjectId, depth: usize) -> anyhow::Result<()> {
    let indent = "  ".repeat(depth);
    println!("{}{}", indent, manager.object_name(node)?);
    let store = manager.properties(node)?;
    for p in store.iter() {
        let prop = store.get_ref(p)?;
        let value = prop.value().map(|v| v.to_string()).unwrap_or_default();
        println!("{}  {} : {:?} = {}", indent, prop.hierarchical_name(), prop.data_type(), value);
    }
    for &child in manager.node_children(node)? {
        print_props(manager, child, depth + 1)?;
    }
    Ok(())
}

fn cmd_settings(settings: &ExportSettings) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    if let Some(p) = ExportSettings::path() {
        println!("# {}", p.display());
    }
    Ok(())
}
