//! XLSX reader

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use evalboard_core::{header_keys, CellValue, Sheet, Workbook};

/// Cell grid of one worksheet, keyed by 0-based (row, column)
type Grid = BTreeMap<u32, BTreeMap<u32, CellValue>>;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode control characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Parse an A1-style reference into 0-based (row, column)
fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let cell_ref = cell_ref.trim().replace('$', "");
    let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col
            .checked_mul(26)?
            .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

/// Get an unescaped attribute value from an element
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.to_string()))
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::new();

        for (name, r_id) in &sheet_info {
            let Some(path) = sheet_paths.get(r_id) else {
                tracing::warn!(sheet = name.as_str(), "no worksheet part for sheet; skipping");
                continue;
            };
            let grid = Self::read_worksheet(&mut archive, path, &shared_strings)?;
            let sheet = Self::grid_to_sheet(name, &grid);
            tracing::debug!(sheet = name.as_str(), rows = sheet.row_count(), "decoded xlsx sheet");
            workbook.add_sheet(sheet)?;
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        current.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    let text = e.unescape().map_err(XlsxError::Xml)?;
                    current.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds, in tab order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) =
                        (attr_value(&e, b"name"), attr_value(&e, b"r:id"))
                    {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    // Only worksheet relationships; chartsheets carry no rows
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read the cell values of one worksheet part
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
    ) -> XlsxResult<Grid> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut grid = Grid::new();

        // Position tracking for rows/cells that omit their `r` attribute
        let mut current_row: u32 = 0;
        let mut next_col: u32 = 0;

        let mut cell_pos: Option<(u32, u32)> = None;
        let mut cell_type: Option<String> = None;
        let mut value = String::new();
        let mut has_value = false;
        let mut in_value = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = match attr_value(&e, b"r").and_then(|r| r.parse::<u32>().ok())
                        {
                            Some(r) => r.saturating_sub(1),
                            None if grid.is_empty() => 0,
                            None => current_row + 1,
                        };
                        next_col = 0;
                    }
                    b"c" => {
                        let pos = attr_value(&e, b"r")
                            .and_then(|r| parse_cell_ref(&r))
                            .unwrap_or((current_row, next_col));
                        next_col = pos.1 + 1;
                        cell_pos = Some(pos);
                        cell_type = attr_value(&e, b"t");
                        value.clear();
                        has_value = false;
                    }
                    b"v" if cell_pos.is_some() => in_value = true,
                    b"t" if cell_pos.is_some() => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                    // Style-only cell with no value
                    let pos = attr_value(&e, b"r")
                        .and_then(|r| parse_cell_ref(&r))
                        .unwrap_or((current_row, next_col));
                    next_col = pos.1 + 1;
                }
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    let text = e.unescape().map_err(XlsxError::Xml)?;
                    value.push_str(&text);
                    has_value = true;
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"v" => in_value = false,
                    b"t" => in_inline_text = false,
                    b"c" => {
                        if let Some((row, col)) = cell_pos.take() {
                            if has_value {
                                let cell =
                                    Self::process_cell(cell_type.as_deref(), &value, shared_strings)?;
                                grid.entry(row).or_default().insert(col, cell);
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(grid)
    }

    /// Convert a raw `<c>` value into a cell value
    fn process_cell(
        cell_type: Option<&str>,
        value: &str,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        let cell = match cell_type {
            // Shared string
            Some("s") => {
                let idx: usize = value.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::string(s.as_str())
            }

            // Boolean
            Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),

            // Inline or formula string - decode Excel escape sequences
            Some("inlineStr") | Some("str") => CellValue::string(decode_excel_escapes(value)),

            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::string(value),
            },

            // Errors (#N/A, #DIV/0!) and unknown types keep their text
            Some(_) => CellValue::string(value),
        };
        Ok(cell)
    }

    /// Key every data row by the header row, like a sheet-to-records export
    ///
    /// The header is the first non-empty row. Columns span the sheet's used
    /// range; cells absent from a data row become [`CellValue::Empty`]. Rows
    /// with no values are skipped.
    fn grid_to_sheet(name: &str, grid: &Grid) -> Sheet {
        let mut rows = grid.iter().filter(|(_, cells)| !cells.is_empty());

        let Some((_, header_cells)) = rows.next() else {
            return Sheet::new(name);
        };

        let min_col = grid
            .values()
            .filter_map(|cells| cells.keys().next())
            .min()
            .copied()
            .unwrap_or(0);
        let max_col = grid
            .values()
            .filter_map(|cells| cells.keys().next_back())
            .max()
            .copied()
            .unwrap_or(0);

        let header = header_keys((min_col..=max_col).map(|col| {
            header_cells
                .get(&col)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        let mut sheet = Sheet::with_columns(name, header);

        for (_, cells) in rows {
            if cells.values().all(CellValue::is_blank) {
                continue;
            }
            sheet.push_values(
                (min_col..=max_col).map(|col| cells.get(&col).cloned().unwrap_or_default()),
            );
        }

        sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

    fn build_xlsx(sheets: &[(&str, &str)], shared_strings: Option<&str>) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();

            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(CONTENT_TYPES).unwrap();

            let mut workbook = String::from(r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#);
            let mut rels = String::from(r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
            for (i, (name, _)) in sheets.iter().enumerate() {
                workbook.push_str(&format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    name,
                    i + 1,
                    i + 1
                ));
                rels.push_str(&format!(
                    r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                    i + 1,
                    i + 1
                ));
            }
            workbook.push_str("</sheets></workbook>");
            rels.push_str("</Relationships>");

            zip.start_file("xl/workbook.xml", options).unwrap();
            zip.write_all(workbook.as_bytes()).unwrap();
            zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
            zip.write_all(rels.as_bytes()).unwrap();

            if let Some(sst) = shared_strings {
                zip.start_file("xl/sharedStrings.xml", options).unwrap();
                zip.write_all(sst.as_bytes()).unwrap();
            }

            for (i, (_, sheet_data)) in sheets.iter().enumerate() {
                zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                    .unwrap();
                zip.write_all(
                    format!(
                        r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
                        sheet_data
                    )
                    .as_bytes(),
                )
                .unwrap();
            }

            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_decode_excel_escapes() {
        assert_eq!(decode_excel_escapes("hello_x000d_world"), "hello\rworld");
        assert_eq!(decode_excel_escapes("line1_x000D__x000A_line2"), "line1\r\nline2");
        assert_eq!(decode_excel_escapes("under_x005f_score"), "under_score");
        assert_eq!(decode_excel_escapes("plain text"), "plain text");
        assert_eq!(decode_excel_escapes("_x00"), "_x00");
        assert_eq!(decode_excel_escapes("_x000d"), "_x000d");
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("$C$7"), Some((6, 2)));
        assert_eq!(parse_cell_ref("AA10"), Some((9, 26)));
        assert_eq!(parse_cell_ref("10"), None);
        assert_eq!(parse_cell_ref("A0"), None);
    }

    #[test]
    fn test_read_empty_sheet() {
        let bytes = build_xlsx(&[("Sheet1", "")], None);
        let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();

        assert_eq!(workbook.sheet_count(), 1);
        assert!(workbook.sheet("Sheet1").unwrap().is_empty());
    }

    #[test]
    fn test_read_records_with_shared_strings() {
        let sst = r#"<?xml version="1.0"?><sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><t>Category</t></si><si><t>GPT</t></si><si><r><t>Claude</t></r></si><si><t>Accuracy</t></si><si><t>OVERALL</t></si></sst>"#;
        let data = concat!(
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c></row>"#,
            r#"<row r="2"><c r="A2" t="s"><v>3</v></c><c r="B2"><v>9.1</v></c></row>"#,
            r#"<row r="4"><c r="A4" t="s"><v>4</v></c><c r="B4"><f>AVERAGE(B2:B3)</f><v>8.7</v></c><c r="C4" t="inlineStr"><is><t>n/a</t></is></c></row>"#,
        );
        let bytes = build_xlsx(&[("Overall Score Comparison", data)], Some(sst));
        let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();
        let sheet = workbook.sheet("Overall Score Comparison").unwrap();

        assert_eq!(sheet.columns(), &["Category", "GPT", "Claude"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.rows()[0].value("Category"), &CellValue::string("Accuracy"));
        assert_eq!(sheet.rows()[0].value("GPT"), &CellValue::Number(9.1));
        assert_eq!(sheet.rows()[0].value("Claude"), &CellValue::Empty);
        assert_eq!(sheet.rows()[1].value("GPT"), &CellValue::Number(8.7));
        assert_eq!(sheet.rows()[1].value("Claude"), &CellValue::string("n/a"));
    }

    #[test]
    fn test_blank_header_cells_get_placeholder_keys() {
        let data = concat!(
            r#"<row r="1"><c r="B1" t="inlineStr"><is><t>GPT</t></is></c></row>"#,
            r#"<row r="2"><c r="A2" t="inlineStr"><is><t>Accuracy</t></is></c><c r="B2"><v>9</v></c></row>"#,
        );
        let bytes = build_xlsx(&[("Pivot", data)], None);
        let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();
        let sheet = workbook.sheet("Pivot").unwrap();

        assert_eq!(sheet.columns(), &["__EMPTY", "GPT"]);
        assert_eq!(sheet.rows()[0].value("__EMPTY"), &CellValue::string("Accuracy"));
    }

    #[test]
    fn test_sheet_order_follows_workbook() {
        let bytes = build_xlsx(
            &[("Model Comparison", ""), ("Faithfulness Comparison", "")],
            None,
        );
        let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();
        assert_eq!(
            workbook.sheet_names().collect::<Vec<_>>(),
            ["Model Comparison", "Faithfulness Comparison"]
        );
    }

    #[test]
    fn test_not_an_xlsx() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"hello").unwrap();
            zip.finish().unwrap();
        }
        assert!(matches!(
            XlsxReader::read(Cursor::new(buf)),
            Err(XlsxError::InvalidFormat(_))
        ));
    }
}
