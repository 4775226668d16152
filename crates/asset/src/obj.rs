//! OBJ loader producing a flat, non-indexed position+normal triangle list.
//!
//! Supported records: `v`, `vn`, `f` (any convex polygon, fan-triangulated).
//! Everything else (`vt`, `o`, `g`, `s`, `usemtl`, ...) is ignored.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    num::IntErrorKind,
    path::Path,
};

use corelib::{ObjError, ObjResult};

use crate::mesh::{MeshVertex, VertexBuffer};

const ZERO_NORMAL: [f32; 3] = [0.0, 0.0, 0.0];

/// Load an OBJ file from a path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<VertexBuffer> {
    let path = path.as_ref();
    log::info!("Loading OBJ from {:?}", path);

    let file = File::open(path).map_err(|source| ObjError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_obj_from_reader(BufReader::new(file))
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> ObjResult<VertexBuffer> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<VertexBuffer> {
    parse_obj(io::Cursor::new(contents))
}

/// One tokenized line.
#[derive(Debug, PartialEq)]
enum Record<'a> {
    Position([f32; 3]),
    Normal([f32; 3]),
    Face(Vec<&'a str>),
    Skip,
}

/// Decoded face corner, 0-based. `normal` is `None` when the token has
/// no normal component or it points outside the declared normals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FaceRef {
    position: usize,
    normal: Option<usize>,
}

/// Number of positions/normals declared so far.
#[derive(Clone, Copy, Debug)]
struct Declared {
    positions: usize,
    normals: usize,
}

fn parse_obj<R: BufRead>(reader: R) -> ObjResult<VertexBuffer> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut out = VertexBuffer::new();
    let mut degenerate = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ObjError::Read {
            line: line_no,
            source,
        })?;

        match tokenize(&line, line_no)? {
            Record::Position(p) => positions.push(p),
            Record::Normal(n) => normals.push(n),
            Record::Face(tokens) => {
                if tokens.len() < 3 {
                    log::trace!("Skipping degenerate face on line {}", line_no);
                    degenerate += 1;
                    continue;
                }
                let declared = Declared {
                    positions: positions.len(),
                    normals: normals.len(),
                };

                // Triangulate fan: (0, i, i + 1)
                let r0 = parse_face_ref(tokens[0], declared, line_no)?;
                let v0 = resolve(r0, &positions, &normals);
                for pair in tokens[1..].windows(2) {
                    let r1 = parse_face_ref(pair[0], declared, line_no)?;
                    let r2 = parse_face_ref(pair[1], declared, line_no)?;
                    out.push_triangle([
                        v0,
                        resolve(r1, &positions, &normals),
                        resolve(r2, &positions, &normals),
                    ]);
                }
            }
            Record::Skip => {}
        }
    }

    log::debug!(
        "Parsed OBJ: {} positions, {} normals, {} triangles, {} degenerate faces skipped",
        positions.len(),
        normals.len(),
        out.triangle_count(),
        degenerate
    );

    Ok(out)
}

fn tokenize(line: &str, line_no: usize) -> ObjResult<Record<'_>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(Record::Skip);
    }

    let mut parts = trimmed.split_whitespace();
    let Some(tag) = parts.next() else {
        return Ok(Record::Skip);
    };

    match tag {
        "v" => parse_triple(parts, "v", line_no).map(Record::Position),
        "vn" => parse_triple(parts, "vn", line_no).map(Record::Normal),
        "f" => Ok(Record::Face(parts.collect())),
        _ => Ok(Record::Skip),
    }
}

/// Reads exactly three floats; trailing components (e.g. `w`) are ignored.
fn parse_triple<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    tag: &'static str,
    line_no: usize,
) -> ObjResult<[f32; 3]> {
    let mut tokens = [""; 3];
    for (found, slot) in tokens.iter_mut().enumerate() {
        *slot = parts.next().ok_or(ObjError::InsufficientComponents {
            line: line_no,
            tag,
            found,
        })?;
    }
    Ok([
        parse_f32(tokens[0], line_no)?,
        parse_f32(tokens[1], line_no)?,
        parse_f32(tokens[2], line_no)?,
    ])
}

fn parse_f32(token: &str, line_no: usize) -> ObjResult<f32> {
    token.parse::<f32>().map_err(|_| ObjError::MalformedNumber {
        line: line_no,
        token: token.to_owned(),
        expected: "float",
    })
}

/// Integers too wide for `i64` saturate, so they land out of range
/// instead of being reported as malformed.
fn parse_index(token: &str, line_no: usize) -> ObjResult<i64> {
    match token.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ObjError::MalformedNumber {
                line: line_no,
                token: token.to_owned(),
                expected: "index",
            }),
        },
    }
}

/// 1-based source index -> 0-based slot, if it falls inside `len`.
fn to_slot(raw: i64, len: usize) -> Option<usize> {
    raw.checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < len)
}

/// Decode `v`, `v/t`, `v//n` or `v/t/n`. The texture component is ignored.
fn parse_face_ref(token: &str, declared: Declared, line_no: usize) -> ObjResult<FaceRef> {
    let mut comps = token.split('/');
    // split always yields at least one item; an empty one fails parse_index
    let raw_pos = parse_index(comps.next().unwrap_or(""), line_no)?;
    let position = to_slot(raw_pos, declared.positions).ok_or(ObjError::IndexOutOfRange {
        line: line_no,
        index: raw_pos,
        count: declared.positions,
    })?;

    let normal = match comps.nth(1) {
        Some(value) if !value.is_empty() => {
            to_slot(parse_index(value, line_no)?, declared.normals)
        }
        _ => None,
    };

    Ok(FaceRef { position, normal })
}

fn resolve(r: FaceRef, positions: &[[f32; 3]], normals: &[[f32; 3]]) -> MeshVertex {
    let normal = r.normal.map_or(ZERO_NORMAL, |n| normals[n]);
    MeshVertex::new(positions[r.position], normal)
}
