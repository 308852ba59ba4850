//! CSV table serializer.

use docsplit_shared::{Chunk, DocsplitError, Result};

const HEADER: [&str; 3] = ["chunk", "content", "characters"];

/// One row per chunk: 1-based ordinal, content, character count.
/// The header row is always written, even for an empty chunk list.
pub fn render_csv(chunks: &[Chunk]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(HEADER).map_err(csv_error)?;
    for chunk in chunks {
        writer
            .write_record([
                chunk.index.to_string().as_str(),
                chunk.text.as_str(),
                chunk.char_len().to_string().as_str(),
            ])
            .map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| DocsplitError::serialization("csv", e.to_string()))
}

fn csv_error(e: csv::Error) -> DocsplitError {
    DocsplitError::serialization("csv", e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read_rows(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_reader(bytes);
        let header = reader
            .headers()
            .expect("header")
            .iter()
            .map(String::from)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.expect("row").iter().map(String::from).collect())
            .collect();
        (header, rows)
    }

    #[test]
    fn one_row_per_chunk() {
        let chunks = vec![
            Chunk {
                index: 1,
                text: "plain".into(),
            },
            Chunk {
                index: 2,
                text: "has, comma\nand \"quotes\"\n".into(),
            },
        ];

        let bytes = render_csv(&chunks).expect("render");
        let (header, rows) = read_rows(&bytes);

        assert_eq!(header, vec!["chunk", "content", "characters"]);
        assert_eq!(
            rows,
            vec![
                vec!["1".to_string(), "plain".to_string(), "5".to_string()],
                vec![
                    "2".to_string(),
                    "has, comma\nand \"quotes\"\n".to_string(),
                    "24".to_string()
                ],
            ]
        );
    }

    #[test]
    fn character_count_is_not_byte_count() {
        let chunks = vec![Chunk {
            index: 1,
            text: "日本語".into(),
        }];
        let (_, rows) = read_rows(&render_csv(&chunks).expect("render"));
        assert_eq!(rows[0][2], "3");
    }

    #[test]
    fn empty_table_has_header_only() {
        let bytes = render_csv(&[]).expect("render");
        assert_eq!(String::from_utf8(bytes).expect("utf8"), "chunk,content,characters\n");
    }
}
