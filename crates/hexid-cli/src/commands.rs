use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use hexid::{BasicGenerator, Id, Representation, StoredValue, SystemClock, hashed_id};
use serde::Serialize;
use serde_json::json;

use crate::config::{Command, Config};

/// Fields of a decoded ID, as printed by `decode`.
#[derive(Debug, Serialize)]
pub struct Decoded {
    pub id: Id,
    pub raw: u64,
    pub unix_seconds: u32,
    pub millis: u16,
    pub node: u8,
    pub sequence: u16,
    pub hashed: bool,
    pub time: Option<String>,
}

impl From<Id> for Decoded {
    fn from(id: Id) -> Self {
        Self {
            id,
            raw: id.to_raw(),
            unix_seconds: id.unix_seconds(),
            millis: id.millis(),
            node: id.node(),
            sequence: id.sequence(),
            hashed: id.is_hashed(),
            time: rfc3339(id),
        }
    }
}

/// Formats the embedded timestamp, or `None` for content-derived IDs.
fn rfc3339(id: Id) -> Option<String> {
    let millis = i64::try_from(id.unix_millis()?).ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn plain_value(value: &StoredValue) -> String {
    match value {
        StoredValue::Null => String::from("null"),
        StoredValue::Int64(v) => v.to_string(),
        StoredValue::Uint64(v) => v.to_string(),
        StoredValue::Text(token) => token.clone(),
        StoredValue::Binary(bytes) => hex_bytes(bytes),
    }
}

fn json_value(value: &StoredValue) -> serde_json::Value {
    match value {
        StoredValue::Null => serde_json::Value::Null,
        StoredValue::Int64(v) => json!(v),
        StoredValue::Uint64(v) => json!(v),
        StoredValue::Text(token) => json!(token),
        StoredValue::Binary(bytes) => json!(hex_bytes(bytes)),
    }
}

fn write_id(out: &mut impl Write, id: Id, repr: Representation, as_json: bool) -> anyhow::Result<()> {
    let value = id.to_value(repr);
    if as_json {
        let record = json!({ "id": id, "repr": repr.as_str(), "value": json_value(&value) });
        writeln!(out, "{record}")?;
    } else {
        writeln!(out, "{}", plain_value(&value))?;
    }
    Ok(())
}

fn write_decoded(out: &mut impl Write, decoded: &Decoded, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        serde_json::to_writer(&mut *out, decoded)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "id:           {}", decoded.id)?;
    writeln!(out, "raw:          {}", decoded.raw)?;
    writeln!(out, "unix_seconds: {}", decoded.unix_seconds)?;
    writeln!(out, "millis:       {}", decoded.millis)?;
    writeln!(out, "node:         {}", decoded.node)?;
    writeln!(out, "sequence:     {}", decoded.sequence)?;
    match &decoded.time {
        Some(time) => writeln!(out, "time:         {time}")?,
        None => writeln!(out, "time:         hashed")?,
    }
    Ok(())
}

/// Executes the configured command, writing results to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.command {
        Command::Generate { count } => {
            let generator = BasicGenerator::new(config.node, SystemClock)?;
            tracing::debug!(node = config.node, count, repr = %config.repr, "generating ids");
            for _ in 0..*count {
                write_id(out, generator.next_id(), config.repr, config.json)?;
            }
        }
        Command::Decode { token } => {
            let id = Id::decode(token.trim())
                .with_context(|| format!("cannot decode token {token:?}"))?;
            if !id.is_valid() {
                tracing::warn!(raw = id.to_raw(), "decoded id sets the reserved top bit");
            }
            write_decoded(out, &Decoded::from(id), config.json)?;
        }
        Command::Encode { raw } => {
            let id = Id::from_raw(*raw);
            if !id.is_valid() {
                tracing::warn!(raw, "raw value sets the reserved top bit");
            }
            if config.json {
                writeln!(out, "{}", json!({ "raw": raw, "id": id.encode().as_str() }))?;
            } else {
                writeln!(out, "{}", id.encode())?;
            }
        }
        Command::Hash { parts } => {
            let id = hashed_id(parts);
            tracing::debug!(parts = parts.len(), id = %id, "hashed content");
            write_id(out, id, config.repr, config.json)?;
        }
    }
    out.flush()?;
    Ok(())
}
