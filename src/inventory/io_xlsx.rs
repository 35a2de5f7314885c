// Excel exports of online forms.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use chrono::NaiveDate;

use crate::inventory::{
    io_common::{make_default_id, HeaderLayout},
    *,
};

pub fn read_xlsx_responses(
    path: &str,
    cfs: &FileSource,
    catalog: &Catalog,
) -> InvResult<Vec<ParsedSubmission>> {
    let default_id = make_default_id(path);

    let wrange = get_range(path, cfs)?;

    let mut iter = wrange.rows();
    let header_row = iter.next().context(EmptyExcelSnafu {})?;
    let header: Vec<Option<String>> = header_row
        .iter()
        .map(|dt| cell_text(dt, 1).map(|s| Some(s).filter(|s| !s.is_empty())))
        .collect::<InvResult<Vec<Option<String>>>>()?;
    debug!("read_xlsx_responses: header: {:?}", header);
    let layout = HeaderLayout::from_header(&header, cfs, catalog);

    let mut res: Vec<ParsedSubmission> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // The header is on line 1.
        let lineno = idx + 2;
        let cells: Vec<String> = row
            .iter()
            .map(|dt| cell_text(dt, lineno as u64))
            .collect::<InvResult<Vec<String>>>()?;
        debug!("read_xlsx_responses: lineno: {:?} row: {:?}", lineno, &cells);
        match layout.assemble(default_id(lineno), &cells) {
            Some(ps) => res.push(ps),
            None => {
                debug!("read_xlsx_responses: lineno: {:?} is empty, skipped", lineno);
            }
        }
    }
    Ok(res)
}

/// The text of a cell. Whole numbers are written without decimals and dates
/// as day/month/year.
fn cell_text(dt: &DataType, lineno: u64) -> InvResult<String> {
    let wrong_type = || {
        ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", dt),
        }
        .build()
    };
    match dt {
        DataType::Empty => Ok("".to_string()),
        DataType::String(s) => Ok(s.clone()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        DataType::DateTime(f) => excel_date(*f)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .ok_or_else(wrong_type),
        _ => Err(wrong_type()),
    }
}

// 9999-12-31, the last day Excel can display.
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// Excel stores dates as a number of days since 1899-12-30.
fn excel_date(serial: f64) -> Option<NaiveDate> {
    if !(0.0..=EXCEL_MAX_SERIAL).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?
        .checked_add_signed(chrono::Duration::days(serial.floor() as i64))
}

fn get_range(path: &str, cfs: &FileSource) -> InvResult<calamine::Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "get_range: path: {:?} worksheet: {:?}",
                    &path, &worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => AmbiguousWorksheetSnafu {
                path,
                count: all_worksheets.len(),
            }
            .fail(),
        }
    }
}
