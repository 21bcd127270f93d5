//! Duration table layouts.
//!
//! Both layouts produce rows of string cells ready for a CSV writer.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::aggregate::DurationTable;

/// A grid row.
pub type Row = Vec<String>;

/// Output layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// One row per series: the name followed by its durations.
    #[default]
    Horizontal,
    /// A header of series names, then one row per duration index.
    Vertical,
}

impl Orientation {
    /// Resolves a layout name. Unrecognized names fall back to [`Orientation::Horizontal`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "vertical" => Self::Vertical,
            "horizontal" => Self::Horizontal,
            other => {
                tracing::debug!(orientation = other, "unknown orientation, using horizontal");
                Self::Horizontal
            }
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Orientation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(OrientationVisitor)
    }
}

/// Accepts any value: strings go through [`Orientation::from_name`], everything else is
/// horizontal.
struct OrientationVisitor;

impl OrientationVisitor {
    fn fallback(found: &dyn fmt::Display) -> Orientation {
        tracing::debug!(orientation = %found, "non-string orientation, using horizontal");
        Orientation::Horizontal
    }
}

impl<'de> Visitor<'de> for OrientationVisitor {
    type Value = Orientation;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an orientation name")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Orientation::from_name(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Self::fallback(&v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Self::fallback(&v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Self::fallback(&v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Self::fallback(&v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
        Ok(Self::fallback(&v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(std::str::from_utf8(v).map_or_else(
            |_| Self::fallback(&"<bytes>"),
            Orientation::from_name,
        ))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Self::fallback(&"()"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Self::fallback(&"none"))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Self::fallback(&"[..]"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Self::fallback(&"{..}"))
    }
}

/// Lays out `table` in the given orientation.
pub fn render(table: &DurationTable, orientation: Orientation) -> Vec<Row> {
    match orientation {
        Orientation::Horizontal => horizontal(table),
        Orientation::Vertical => vertical(table),
    }
}

/// `[series, d0, d1, ...]` per series, in table order.
pub fn horizontal(table: &DurationTable) -> Vec<Row> {
    table
        .iter()
        .map(|series| {
            std::iter::once(series.name.clone())
                .chain(series.durations.iter().map(ToString::to_string))
                .collect()
        })
        .collect()
}

/// Header of series names, then row `i` holds every series' `i`-th duration.
///
/// Series with fewer durations leave an empty cell. Rows stop at the longest list.
/// An empty table produces no rows, not even a header.
pub fn vertical(table: &DurationTable) -> Vec<Row> {
    if table.is_empty() {
        return Vec::new();
    }

    let depth = table.max_len();
    let mut rows = Vec::with_capacity(depth + 1);
    rows.push(table.names().map(str::to_string).collect());

    for i in 0..depth {
        rows.push(
            table
                .iter()
                .map(|series| {
                    series
                        .durations
                        .get(i)
                        .map_or_else(String::new, ToString::to_string)
                })
                .collect(),
        );
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DurationTable {
        [("A", vec![10, 20]), ("B", vec![5])].into_iter().collect()
    }

    fn to_csv(rows: &[Row]) -> String {
        rows.iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn horizontal_one_row_per_series() {
        assert_eq!(
            horizontal(&sample()),
            vec![vec!["A", "10", "20"], vec!["B", "5"]]
        );
    }

    #[test]
    fn vertical_header_then_indexed_rows() {
        assert_eq!(
            vertical(&sample()),
            vec![vec!["A", "B"], vec!["10", "5"], vec!["20", ""]]
        );
    }

    #[test]
    fn render_dispatches_on_orientation() {
        let table = sample();
        assert_eq!(render(&table, Orientation::Horizontal), horizontal(&table));
        assert_eq!(render(&table, Orientation::Vertical), vertical(&table));
        assert_eq!(render(&table, Orientation::default()), horizontal(&table));
    }

    #[test]
    fn empty_series_still_gets_a_row() {
        let table = sample().with_series("C");
        insta::assert_snapshot!(to_csv(&horizontal(&table)), @r"
        A,10,20
        B,5
        C
        ");
        insta::assert_snapshot!(to_csv(&vertical(&table)), @r"
        A,B,C
        10,5,
        20,,
        ");
    }

    #[test]
    fn negative_durations_render_with_sign() {
        let table: DurationTable = [("late", vec![-3, 4])].into_iter().collect();
        assert_eq!(horizontal(&table), vec![vec!["late", "-3", "4"]]);
    }

    #[test]
    fn empty_table_renders_nothing() {
        let table = DurationTable::new();
        assert!(horizontal(&table).is_empty());
        assert!(vertical(&table).is_empty());
    }

    #[test]
    fn only_empty_series_gives_header_only() {
        let table = DurationTable::new().with_series("idle");
        assert_eq!(vertical(&table), vec![vec!["idle"]]);
    }

    #[test]
    fn orientation_names() {
        assert_eq!(Orientation::from_name("vertical"), Orientation::Vertical);
        assert_eq!(Orientation::from_name("horizontal"), Orientation::Horizontal);
        assert_eq!(Orientation::from_name("diagonal"), Orientation::Horizontal);
        assert_eq!(Orientation::from_name("Vertical"), Orientation::Horizontal);
        assert_eq!(Orientation::Vertical.to_string(), "vertical");
    }

    #[test]
    fn orientation_deserializes_from_any_value() {
        use serde::de::IntoDeserializer;
        use serde::de::value::Error;

        fn parse<'de, D: IntoDeserializer<'de, Error>>(value: D) -> Orientation {
            Orientation::deserialize(value.into_deserializer()).expect("never fails")
        }

        assert_eq!(parse("vertical"), Orientation::Vertical);
        assert_eq!(parse("sideways".to_string()), Orientation::Horizontal);
        assert_eq!(parse(0_u64), Orientation::Horizontal);
        assert_eq!(parse(-1_i64), Orientation::Horizontal);
        assert_eq!(parse(true), Orientation::Horizontal);
        assert_eq!(parse(1.5_f64), Orientation::Horizontal);
        assert_eq!(parse(()), Orientation::Horizontal);
        assert_eq!(parse(vec!["vertical"]), Orientation::Horizontal);
    }
}
