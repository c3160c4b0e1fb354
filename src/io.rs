//! Line-oriented text dump of a family.
//!
//! # Format
//!
//! ```text
//! <id> <var> <lo> <hi>    # one decision node per line
//! .                       # end of diagram
//! ```
//!
//! Nodes appear bottom-up (children before parents), the root last. Child
//! references are either an `<id>` defined on an earlier line or one of the
//! terminal tokens `B` (⊥, the empty family) and `T` (⊤, {∅}). A terminal
//! family is written as a single `B` or `T` line before the end marker.
//!
//! Ids are only meaningful within one dump; loading re-canonicalizes every
//! node, so `load(dump(f)) == f` in any manager. Elements above
//! [`ZddManager::max_vars`] are refused with a parse error.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

const ZERO_TOKEN: &str = "B";
const ONE_TOKEN: &str = "T";
const END_TOKEN: &str = ".";

impl ZddManager {
    /// Writes `f` to `writer` in the dump format.
    pub fn write_dump<W: Write>(&self, f: ZddId, mut writer: W) -> Result<()> {
        if f.is_terminal() {
            writeln!(writer, "{}", terminal_token(f))?;
        } else {
            let nodes = self.nodes_bottom_up(f);
            debug!("Dumping {} nodes rooted at {}", nodes.len(), f);

            // Root must come last; it is alone at the top level
            debug_assert_eq!(nodes.last(), Some(&f));
            for id in nodes {
                let node = self.node(id);
                writeln!(
                    writer,
                    "{} {} {} {}",
                    id.raw(),
                    node.var.id(),
                    reference_token(node.lo),
                    reference_token(node.hi)
                )?;
            }
        }
        writeln!(writer, "{}", END_TOKEN)?;
        Ok(())
    }

    pub fn to_dump_string(&self, f: ZddId) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_dump(f, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Saves `f` to a file in the dump format.
    pub fn save_dump<P: AsRef<Path>>(&self, f: ZddId, path: P) -> Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_dump(f, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a family from `reader`, allocating elements as needed.
    pub fn read_dump<R: BufRead>(&self, reader: R) -> Result<ZddId> {
        let mut ids: HashMap<u32, ZddId> = HashMap::new();
        let mut root: Option<ZddId> = None;

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line == END_TOKEN {
                let root = root.ok_or_else(|| parse_error(line_no, "empty diagram"))?;
                debug!("Loaded {} nodes, root {}", ids.len(), root);
                return Ok(root);
            }
            if root.is_some_and(|r| r.is_terminal()) {
                return Err(parse_error(line_no, "terminal diagram must be followed by the end marker"));
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [token] => {
                    if root.is_some() {
                        return Err(parse_error(line_no, "terminal line after decision nodes"));
                    }
                    root = Some(parse_terminal(token).ok_or_else(|| {
                        parse_error(line_no, format!("unknown terminal token '{}'", token))
                    })?);
                }
                [id, var, lo, hi] => {
                    let id: u32 = id
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("invalid node id '{}'", id)))?;
                    let var: u32 = var
                        .parse()
                        .ok()
                        .filter(|&v| v > 0)
                        .ok_or_else(|| parse_error(line_no, format!("invalid element '{}'", var)))?;
                    if var as usize > self.max_vars() {
                        return Err(parse_error(
                            line_no,
                            format!("element {} exceeds the universe limit {}", var, self.max_vars()),
                        ));
                    }
                    let lo = resolve(&ids, lo, line_no)?;
                    let hi = resolve(&ids, hi, line_no)?;

                    let var = self.ensure_var(Var::new(var));
                    let level = self.level(var);
                    if self.top_level(lo) <= level || self.top_level(hi) <= level {
                        return Err(parse_error(line_no, format!("children of node {} are not below {}", id, var)));
                    }

                    let node = self.get_node(var, lo, hi);
                    if ids.insert(id, node).is_some() {
                        return Err(parse_error(line_no, format!("duplicate node id {}", id)));
                    }
                    root = Some(node);
                }
                _ => return Err(parse_error(line_no, format!("malformed line '{}'", line))),
            }
        }

        Err(Error::Parse {
            line: 0,
            message: "missing end marker".to_string(),
        })
    }

    pub fn from_dump_str(&self, content: &str) -> Result<ZddId> {
        self.read_dump(content.as_bytes())
    }

    /// Loads a family from a file in the dump format.
    pub fn load_dump<P: AsRef<Path>>(&self, path: P) -> Result<ZddId> {
        let file = fs::File::open(path)?;
        self.read_dump(std::io::BufReader::new(file))
    }
}

fn terminal_token(f: ZddId) -> &'static str {
    if f.is_one() {
        ONE_TOKEN
    } else {
        ZERO_TOKEN
    }
}

fn reference_token(f: ZddId) -> String {
    if f.is_terminal() {
        terminal_token(f).to_string()
    } else {
        f.raw().to_string()
    }
}

fn parse_terminal(token: &str) -> Option<ZddId> {
    match token {
        ZERO_TOKEN => Some(ZddId::ZERO),
        ONE_TOKEN => Some(ZddId::ONE),
        _ => None,
    }
}

fn resolve(ids: &HashMap<u32, ZddId>, token: &str, line: usize) -> Result<ZddId> {
    if let Some(terminal) = parse_terminal(token) {
        return Ok(terminal);
    }
    let id: u32 = token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid child reference '{}'", token)))?;
    ids.get(&id)
        .copied()
        .ok_or_else(|| parse_error(line, format!("undefined node {}", id)))
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}
