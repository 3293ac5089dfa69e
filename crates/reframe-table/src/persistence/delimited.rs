//! Delimited text export
//!
//! Header row plus one formatted line per row. Missing renders as an empty
//! field. Fields containing the delimiter, a quote, or a newline are
//! quoted with doubled inner quotes. This is an export surface only.

use std::io::Write;

use crate::{Table, TableError};

fn field(text: &str, delim: char) -> String {
    if text.contains(delim) || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

impl Table {
    /// Write the table as delimiter-separated text
    pub fn write_delimited<W: Write>(&self, mut writer: W, delim: char) -> Result<(), TableError> {
        let header: Vec<String> = self.names().iter().map(|n| field(n, delim)).collect();
        writeln!(writer, "{}", header.join(&delim.to_string()))?;

        for row in 0..self.n_rows() {
            let line: Vec<String> = (0..self.n_cols())
                .map(|col| field(&self.column_at(col).values()[row].to_string(), delim))
                .collect();
            writeln!(writer, "{}", line.join(&delim.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reframe_types::{DataType, Value};

    use crate::TableBuilder;

    #[test]
    fn writes_header_and_missing_as_empty() {
        let mut b =
            TableBuilder::new(vec![("name", DataType::Text), ("x", DataType::Integer)]).unwrap();
        b.push_row(vec![Value::Text("a".into()), Value::Integer(1)]).unwrap();
        b.push_row(vec![Value::Text("b".into()), Value::Missing]).unwrap();
        let t = b.finish().unwrap();

        let mut buf = Vec::new();
        t.write_delimited(&mut buf, ',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "name,x\na,1\nb,\n");
    }

    #[test]
    fn quotes_fields_containing_the_delimiter() {
        let mut b = TableBuilder::new(vec![("note", DataType::Text)]).unwrap();
        b.push_row(vec![Value::Text("a,b".into())]).unwrap();
        let t = b.finish().unwrap();

        let mut buf = Vec::new();
        t.write_delimited(&mut buf, ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "note\n\"a,b\"\n");
    }
}
