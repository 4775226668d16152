//! Entry point for flatobj.
//! Loads an OBJ file into a flat position+normal buffer and reports on it.

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, bail};
use asset::{MeshVertex, ObjError, VertexBuffer};

const USAGE: &str = "usage: flatobj <file.obj> [--dump[=on|off]] [--precision=N]";
const DEFAULT_PRECISION: usize = 4;

fn parse_path_arg(args: &[String]) -> Option<&str> {
    // First argument that is not a flag.
    args.iter()
        .map(String::as_str)
        .find(|arg| !arg.starts_with("--"))
}

fn parse_dump_arg(args: &[String]) -> bool {
    // --dump[=on|off], off by default
    for arg in args {
        if arg == "--dump" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--dump=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_precision_arg(args: &[String]) -> usize {
    for arg in args {
        if let Some(v) = arg.strip_prefix("--precision=") {
            match v.parse::<usize>() {
                Ok(p) => return p.min(9),
                Err(_) => {
                    log::warn!(
                        "Invalid precision '{}', falling back to {}.",
                        v,
                        DEFAULT_PRECISION
                    );
                }
            }
        }
    }
    DEFAULT_PRECISION
}

/// `path:line` when the failure is tied to a line, `path` otherwise.
fn load_location(path: &str, err: &ObjError) -> String {
    match err.line() {
        Some(line) => format!("{}:{}", path, line),
        None => path.to_owned(),
    }
}

fn dump_vertices(out: &mut impl Write, buffer: &VertexBuffer, precision: usize) -> io::Result<()> {
    for (i, tri) in buffer.triangles().enumerate() {
        writeln!(out, "# triangle {}", i)?;
        for MeshVertex { position: p, normal: n } in tri {
            writeln!(
                out,
                "{:.prec$} {:.prec$} {:.prec$} {:.prec$} {:.prec$} {:.prec$}",
                p[0],
                p[1],
                p[2],
                n[0],
                n[1],
                n[2],
                prec = precision
            )?;
        }
    }
    out.flush()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = parse_path_arg(&args) else {
        bail!(USAGE);
    };
    let dump = parse_dump_arg(&args);
    let precision = parse_precision_arg(&args);

    let buffer = match asset::load_obj_from_path(path) {
        Ok(buffer) => buffer,
        Err(e) => {
            let location = load_location(path, &e);
            return Err(e).with_context(|| format!("Failed to load OBJ: {}", location));
        }
    };

    log::info!(
        "Loaded {}: {} triangles, {} vertices, {} floats ({} bytes, stride {} bytes)",
        path,
        buffer.triangle_count(),
        buffer.vertex_count(),
        buffer.as_slice().len(),
        buffer.as_bytes().len(),
        MeshVertex::STRIDE
    );

    if dump {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        dump_vertices(&mut out, &buffer, precision).context("Failed to write vertex dump")?;
    }

    Ok(())
}
