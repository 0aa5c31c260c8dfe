//! Downloadable import template.

use crate::record::AnimalField;

/// Template rows that validate cleanly against the embedded catalog.
const EXAMPLE_ROWS: [&str; 2] = [
    "BOV001,Estrela da Manhã,982000123456789,bovino,Nelore,F,2022-03-15,novilha,380,proprio,Lote A,Pasto 1,,,Animal em boa condição",
    "BOV002,Touro Rex,,bovino,Angus,M,2021-01-10,Touro,750,compra,Reprodutores,Pasto 2,,,Reprodutor principal",
];

/// Header columns in template order.
pub fn template_headers() -> Vec<&'static str> {
    AnimalField::ALL.iter().map(|field| field.column()).collect()
}

/// Header line followed by two example rows, newline terminated.
pub fn template_payload() -> String {
    let mut out = template_headers().join(",");
    out.push('\n');
    for row in EXAMPLE_ROWS {
        out.push_str(row);
        out.push('\n');
    }
    out
}
