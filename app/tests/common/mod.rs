//! FILENAME: tests/common/mod.rs
//! Upload fixtures written as real xlsx files.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};

pub enum Cell {
    S(&'static str),
    N(f64),
}

fn write_row(sheet: &mut Worksheet, row: u32, cells: &[Cell]) {
    for (col, cell) in cells.iter().enumerate() {
        match cell {
            Cell::S("") => {}
            Cell::S(s) => {
                sheet.write_string(row, col as u16, *s).unwrap();
            }
            Cell::N(n) => {
                sheet.write_number(row, col as u16, *n).unwrap();
            }
        }
    }
}

/// DNS "new" upload: two stores, three products and a totals row.
pub fn dns_new_upload(dir: &Path) -> PathBuf {
    use Cell::*;
    let path = dir.join("dns_new.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    write_row(sheet, 0, &[S("Изделие"), S(""), S(""), S("Итого"), S(""), S("Москва"), S(""), S("Тула"), S("")]);
    write_row(
        sheet,
        1,
        &[S("Код"), S("Товар"), S("КодПроизводителя"), S("Кол-во"), S("Ост. кол-во"), S("Кол-во"), S("Ост. кол-во"), S("Кол-во"), S("Ост. кол-во")],
    );
    write_row(sheet, 2, &[N(5001.0), S("Колонка Мини"), S("SBDV-00090"), N(5.0), N(9.0), N(2.0), N(4.0), N(3.0), N(5.0)]);
    write_row(sheet, 3, &[N(5002.0), S("Колонка Макс"), S("SBDV-00001"), N(1.0), N(1.0), S(""), N(1.0), N(1.0), S("")]);
    write_row(sheet, 4, &[N(5003.0), S("ТВ-приставка"), S("SBDV-00011"), N(0.0), N(2.0), N(0.0), N(1.0), N(0.0), N(1.0)]);
    write_row(sheet, 5, &[S("Итого"), S(""), S(""), N(6.0), N(12.0), N(2.0), N(6.0), N(4.0), N(6.0)]);
    workbook.save(&path).unwrap();
    path
}

/// DNS lamp upload with merged captions: no manufacturer code column.
pub fn dns_lamp_upload(dir: &Path) -> PathBuf {
    use Cell::*;
    let path = dir.join("dns_lamp.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let plain = Format::new();
    sheet.merge_range(0, 0, 1, 1, "Изделие", &plain).unwrap();
    sheet.merge_range(0, 2, 1, 3, "Итого", &plain).unwrap();
    sheet.merge_range(0, 4, 0, 6, "Москва", &plain).unwrap();
    sheet.merge_range(1, 4, 1, 6, "101", &plain).unwrap();
    write_row(
        sheet,
        2,
        &[S("Код"), S("Товар"), S("Кол-во"), S("Ост. кол-во"), S("Кол-во"), S("Ост. кол-во"), S("Ост. Сумма без НДС")],
    );
    write_row(sheet, 3, &[N(7001.0), S("Лампа E27"), N(4.0), N(8.0), N(4.0), N(8.0), N(1520.75)]);
    write_row(sheet, 4, &[N(7002.0), S("Лампа GU10"), N(1.0), N(3.0), N(1.0), N(3.0), N(410.0)]);
    workbook.save(&path).unwrap();
    path
}

/// MVM upload in the legacy layout (one title row before the header).
pub fn mvm_legacy_upload(dir: &Path) -> PathBuf {
    let path = dir.join("mvm.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Отчет по продажам и остаткам").unwrap();
    sheet.write_string(1, 7, "Итого").unwrap();
    sheet.write_string(1, 33, "Москва").unwrap();
    sheet.write_string(1, 37, "Казань").unwrap();
    sheet.write_number(2, 33, 301.0).unwrap();
    sheet.write_number(2, 35, 302.0).unwrap();
    sheet.write_number(2, 37, 401.0).unwrap();
    sheet.write_string(3, 5, "Код").unwrap();
    sheet.write_string(3, 6, "Наименование").unwrap();
    for start in [33u16, 35, 37] {
        sheet.write_string(3, start, "Продажи, шт").unwrap();
        sheet.write_string(3, start + 1, "Остатки, шт").unwrap();
    }
    let rows: [(f64, &str, [f64; 6]); 3] = [
        (9001.0, "Колонка", [1.0, 2.0, 0.0, 0.0, 3.0, 4.0]),
        (9002.0, "Приставка", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        (9001.0, "Колонка", [1.0, 0.0, 2.0, 0.0, 0.0, 0.0]),
    ];
    for (i, (article, name, values)) in rows.iter().enumerate() {
        let row = 4 + i as u32;
        sheet.write_number(row, 5, *article).unwrap();
        sheet.write_string(row, 6, *name).unwrap();
        for (j, value) in values.iter().enumerate() {
            sheet.write_number(row, 33 + j as u16, *value).unwrap();
        }
    }
    workbook.save(&path).unwrap();
    path
}
