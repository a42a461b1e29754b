//! Synthetic retailer exports shaped like the real uploads.
#![allow(dead_code)]

use engine::{CellValue, Grid, MergeAwareGrid, MergedRegion};

pub struct Product {
    pub article: f64,
    pub name: &'static str,
    pub model: &'static str,
}

pub fn products() -> Vec<Product> {
    vec![
        Product { article: 5001.0, name: "Умная колонка Мини", model: "SBDV-00090" },
        Product { article: 5002.0, name: "Умная колонка Макс", model: "SBDV-00001" },
        Product { article: 5003.0, name: "ТВ-приставка", model: "SBDV-00011" },
    ]
}

/// Deterministic, non-zero value for product `p`, store `s`, metric `m`.
pub fn value(p: usize, s: usize, m: usize) -> f64 {
    (p * 100 + s * 10 + m + 1) as f64
}

fn put(grid: &mut Grid, row: u32, col: u32, value: impl Into<CellValue>) {
    grid.set(row, col, value.into());
}

fn merge(grid: &mut Grid, r1: u32, c1: u32, r2: u32, c2: u32, value: impl Into<CellValue>) {
    grid.set_merged(MergedRegion::new(r1, c1, r2, c2), value.into());
}

/// Closing totals row: "Итого" in the article column, sums elsewhere.
fn totals_row(grid: &mut Grid, row: u32, from: u32, to: u32) {
    put(grid, row, 0, "Итого");
    for col in from..to {
        put(grid, row, col, 999.0);
    }
}

/// DNS "new": row 0 sections, row 1 fields and metrics, no store codes.
pub fn dns_new(stores: &[&str], products: &[Product]) -> Grid {
    const METRICS: [&str; 2] = ["Кол-во", "Ост. кол-во"];
    let mut grid = Grid::new();
    put(&mut grid, 0, 0, "Изделие");
    put(&mut grid, 0, 3, "Итого");
    for (col, label) in ["Код", "Товар", "КодПроизводителя", "Кол-во", "Ост. кол-во"].iter().enumerate() {
        put(&mut grid, 1, col as u32, *label);
    }
    for (s, store) in stores.iter().enumerate() {
        let start = 5 + (s * METRICS.len()) as u32;
        put(&mut grid, 0, start, *store);
        for (m, label) in METRICS.iter().enumerate() {
            put(&mut grid, 1, start + m as u32, *label);
        }
    }
    for (p, product) in products.iter().enumerate() {
        let row = 2 + p as u32;
        put(&mut grid, row, 0, product.article);
        put(&mut grid, row, 1, product.name);
        put(&mut grid, row, 2, product.model);
        for s in 0..stores.len() {
            for m in 0..METRICS.len() {
                put(&mut grid, row, 5 + (s * METRICS.len() + m) as u32, value(p, s, m));
            }
        }
    }
    let end = 5 + (stores.len() * METRICS.len()) as u32;
    totals_row(&mut grid, 2 + products.len() as u32, 3, end);
    grid
}

/// DNS "extended": merged three-row header, store codes on row 1, a
/// category total row merged across the product section.
pub fn dns_extended(stores: &[(&str, f64)], products: &[Product], metrics: &[&str]) -> Grid {
    let width = metrics.len() as u32;
    let mut grid = Grid::new();
    merge(&mut grid, 0, 0, 1, 2, "Изделие");
    merge(&mut grid, 0, 3, 1, 4, "Итого");
    for (col, label) in ["Код", "Товар", "КодПроизводителя", "Кол-во", "Ост. кол-во"].iter().enumerate() {
        put(&mut grid, 2, col as u32, *label);
    }
    for (s, (store, code)) in stores.iter().enumerate() {
        let start = 5 + s as u32 * width;
        merge(&mut grid, 0, start, 0, start + width - 1, *store);
        merge(&mut grid, 1, start, 1, start + width - 1, *code);
        for (m, label) in metrics.iter().enumerate() {
            put(&mut grid, 2, start + m as u32, *label);
        }
    }
    merge(&mut grid, 3, 0, 3, 2, "Умные устройства");
    for (p, product) in products.iter().enumerate() {
        let row = 4 + p as u32;
        put(&mut grid, row, 0, product.article);
        put(&mut grid, row, 1, product.name);
        put(&mut grid, row, 2, product.model);
        for s in 0..stores.len() {
            for m in 0..metrics.len() {
                put(&mut grid, row, 5 + s as u32 * width + m as u32, value(p, s, m));
            }
        }
    }
    totals_row(&mut grid, 4 + products.len() as u32, 3, 5 + stores.len() as u32 * width);
    grid
}

/// Same values without merge metadata, as an .xls upload is read.
pub fn without_merges(source: &Grid) -> Grid {
    let mut grid = Grid::new();
    for row in 0..source.row_count() {
        for col in 0..source.col_count() {
            grid.set(row, col, source.get(row, col).clone());
        }
    }
    grid
}

/// DNS lamp sub-variant: like extended but without "КодПроизводителя".
pub fn dns_lamp(stores: &[(&str, f64)], products: &[Product], metrics: &[&str]) -> Grid {
    let width = metrics.len() as u32;
    let mut grid = Grid::new();
    merge(&mut grid, 0, 0, 1, 1, "Изделие");
    merge(&mut grid, 0, 2, 1, 3, "Итого");
    for (col, label) in ["Код", "Товар", "Кол-во", "Ост. кол-во"].iter().enumerate() {
        put(&mut grid, 2, col as u32, *label);
    }
    for (s, (store, code)) in stores.iter().enumerate() {
        let start = 4 + s as u32 * width;
        merge(&mut grid, 0, start, 0, start + width - 1, *store);
        merge(&mut grid, 1, start, 1, start + width - 1, *code);
        for (m, label) in metrics.iter().enumerate() {
            put(&mut grid, 2, start + m as u32, *label);
        }
    }
    for (p, product) in products.iter().enumerate() {
        let row = 3 + p as u32;
        put(&mut grid, row, 0, product.article);
        put(&mut grid, row, 1, product.name);
        for s in 0..stores.len() {
            for m in 0..metrics.len() {
                put(&mut grid, row, 4 + s as u32 * width + m as u32, value(p, s, m));
            }
        }
    }
    grid
}

/// DNS "old": fixed columns, three-wide store blocks from column 6.
pub fn dns_old(stores: &[(&str, f64)], products: &[Product]) -> Grid {
    let mut grid = Grid::new();
    put(&mut grid, 0, 0, "Изделие");
    put(&mut grid, 0, 3, "Итого");
    for (s, (store, code)) in stores.iter().enumerate() {
        let start = 6 + s as u32 * 3;
        put(&mut grid, 0, start, *store);
        put(&mut grid, 1, start, *code);
        for (m, label) in ["Кол-во", "Ост. кол-во", "Ост. пути"].iter().enumerate() {
            put(&mut grid, 2, start + m as u32, *label);
        }
    }
    for (p, product) in products.iter().enumerate() {
        let row = 3 + p as u32;
        put(&mut grid, row, 0, product.article);
        put(&mut grid, row, 1, product.name);
        put(&mut grid, row, 2, product.model);
        for s in 0..stores.len() {
            for m in 0..3 {
                put(&mut grid, row, 6 + s as u32 * 3 + m as u32, value(p, s, m));
            }
        }
    }
    grid
}

/// MVM: `filter_rows` leading rows, then city, code and label rows.
/// Consecutive blocks of the same city carry the caption only once.
pub fn mvm(blocks: &[(&str, f64)], products: &[Product], filter_rows: u32) -> Grid {
    const METRICS: [&str; 2] = ["Продажи, шт", "Остатки, шт"];
    let caption_row = filter_rows;
    let mut grid = Grid::new();
    for row in 0..filter_rows {
        put(&mut grid, row, 0, format!("Фильтр {}", row + 1));
    }
    put(&mut grid, caption_row, 7, "Итого");
    put(&mut grid, caption_row + 2, 5, "Код");
    put(&mut grid, caption_row + 2, 6, "Наименование");

    let mut previous_city = "";
    for (s, (city, code)) in blocks.iter().enumerate() {
        let start = 33 + (s * METRICS.len()) as u32;
        if *city != previous_city {
            put(&mut grid, caption_row, start, *city);
            previous_city = city;
        }
        put(&mut grid, caption_row + 1, start, *code);
        for (m, label) in METRICS.iter().enumerate() {
            put(&mut grid, caption_row + 2, start + m as u32, *label);
        }
    }
    for (p, product) in products.iter().enumerate() {
        let row = caption_row + 3 + p as u32;
        put(&mut grid, row, 5, product.article);
        put(&mut grid, row, 6, product.name);
        for s in 0..blocks.len() {
            for m in 0..METRICS.len() {
                put(&mut grid, row, 33 + (s * METRICS.len() + m) as u32, value(p, s, m));
            }
        }
    }
    let totals = caption_row + 3 + products.len() as u32;
    put(&mut grid, totals, 6, "Итого");
    grid
}
