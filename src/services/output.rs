use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use serde::Serialize;

/// Whole-number AQI values print without a fractional part.
pub fn format_aqi(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.1}", v)
    }
}

pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

pub fn print_error(json: bool, code: &str, message: &str) {
    if json {
        let body = JsonErr {
            ok: false,
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{}", s),
            Err(_) => println!("{{\"ok\":false}}"),
        }
    } else {
        eprintln!("error: {}", message);
    }
}

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        print_json(data)?;
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        print_json(data)?;
    } else {
        for l in lines(&data) {
            println!("{}", l);
        }
    }
    Ok(())
}

/// Left-aligned text table with a header and a dashed rule.
pub fn render_table(title: &str, header: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }
    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![title.to_string()];
    out.push(line(header.iter().map(|h| h.to_string()).collect()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    if rows.is_empty() {
        out.push("(no data)".to_string());
    }
    for r in rows {
        out.push(line(r.clone()));
    }
    out
}
