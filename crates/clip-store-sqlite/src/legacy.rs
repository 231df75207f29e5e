//! One-time migration for databases written before timestamps were typed.
//!
//! Older writers stored `created_at` as whatever the driver produced: epoch
//! milliseconds, `YYYY-MM-DD HH:MM:SS.fff` text, or nothing usable. They also
//! computed sequence numbers without a transaction, so concurrent adds could
//! leave duplicates. Both are repaired here, once, so the read path can stay
//! strict RFC 3339.
//!
//! Naive text was written from the server's local wall clock, so it is read
//! back in the host's local time zone before being converted to UTC.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use rusqlite::{Connection, params, types::Value};

use crate::encode::encode_dt;

/// Stand-in creation time for rows whose timestamp cannot be recovered.
/// 2024-01-01T00:00:00Z.
pub fn sentinel() -> DateTime<Utc> {
  DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
  "%Y-%m-%dT%H:%M",
];

/// Best-effort decode of a legacy timestamp cell.
///
/// Integers are epoch milliseconds; text is tried as RFC 3339 and then as a
/// naive ISO-like datetime in local time. A naive time that falls in a DST
/// gap has no local reading and is taken as UTC.
pub fn parse_legacy(value: &Value) -> Option<DateTime<Utc>> {
  match value {
    Value::Integer(ms) => DateTime::from_timestamp_millis(*ms),
    Value::Text(s) => {
      let s = s.trim();
      if s.is_empty() {
        return None;
      }
      if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
      }
      NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(local_to_utc)
    }
    _ => None,
  }
}

fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
  naive
    .and_local_timezone(Local)
    .earliest()
    .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Rewrite every `created_at` / `updated_at` cell that is not already
/// canonical RFC 3339. Returns the number of rows touched.
pub fn normalize_timestamps(conn: &Connection) -> rusqlite::Result<usize> {
  let rows: Vec<(i64, Value, Value)> = {
    let mut stmt =
      conn.prepare("SELECT id, created_at, updated_at FROM clipboard_items")?;
    let rows = stmt
      .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    rows
  };

  let mut rewritten = 0;
  for (id, created, updated) in rows {
    let created_str = encode_dt(parse_legacy(&created).unwrap_or_else(sentinel));
    let updated_str = parse_legacy(&updated).map(encode_dt);

    let created_ok = matches!(&created, Value::Text(s) if *s == created_str);
    let updated_ok = match (&updated, &updated_str) {
      (Value::Null, None) => true,
      (Value::Text(s), Some(new)) => s == new,
      _ => false,
    };
    if created_ok && updated_ok {
      continue;
    }

    conn.execute(
      "UPDATE clipboard_items SET created_at = ?1, updated_at = ?2 WHERE id = ?3",
      params![created_str, updated_str, id],
    )?;
    rewritten += 1;
  }

  Ok(rewritten)
}

/// Reassign `item_number` to `1..=N` in `(item_number, id)` order, removing
/// gaps and duplicates. Must run before the unique index exists.
pub fn compact_numbers(conn: &Connection) -> rusqlite::Result<usize> {
  let rows: Vec<(i64, i64)> = {
    let mut stmt = conn.prepare(
      "SELECT id, item_number FROM clipboard_items ORDER BY item_number, id",
    )?;
    let rows = stmt
      .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    rows
  };

  let mut rewritten = 0;
  for (expected, (id, number)) in (1_i64..).zip(rows) {
    if number == expected {
      continue;
    }
    conn.execute(
      "UPDATE clipboard_items SET item_number = ?1 WHERE id = ?2",
      params![expected, id],
    )?;
    rewritten += 1;
  }

  Ok(rewritten)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn parses_epoch_millis() {
    let dt = parse_legacy(&Value::Integer(1_717_243_200_000)).unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
  }

  fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, s).earliest().unwrap().with_timezone(&Utc)
  }

  #[test]
  fn parses_space_and_t_separated_text_as_local_time() {
    let expected = local(2024, 6, 1, 12, 30, 15);
    for s in ["2024-06-01 12:30:15", "2024-06-01T12:30:15", "2024-06-01 12:30:15.000"] {
      assert_eq!(parse_legacy(&Value::Text(s.into())), Some(expected), "{s}");
    }
  }

  #[test]
  fn parses_fractional_seconds() {
    let dt = parse_legacy(&Value::Text("2024-06-01T12:30:15.250".into())).unwrap();
    assert_eq!(dt.timestamp_subsec_millis(), 250);
  }

  #[test]
  fn explicit_offsets_are_not_shifted() {
    let dt = parse_legacy(&Value::Text("2024-06-01T12:30:15+02:00".into())).unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 15).unwrap());
  }

  #[test]
  fn garbage_and_null_are_unparseable() {
    assert_eq!(parse_legacy(&Value::Null), None);
    assert_eq!(parse_legacy(&Value::Text("   ".into())), None);
    assert_eq!(parse_legacy(&Value::Text("yesterday".into())), None);
    assert_eq!(parse_legacy(&Value::Real(1.5)), None);
  }

  #[test]
  fn sentinel_is_start_of_2024() {
    assert_eq!(sentinel(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
  }
}
