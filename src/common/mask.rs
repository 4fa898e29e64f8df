// src/common/mask.rs

use crate::models::pessoa::TipoPessoa;

// Padrões de máscara: '0' é uma posição de dígito, o resto é separador literal.
const CPF_PATTERN: &str = "000.000.000-00";
const CNPJ_PATTERN: &str = "00.000.000/0000-00";
const CEP_PATTERN: &str = "00000-000";
const PHONE_PATTERN: &str = "(00) 0000-0000";
const MOBILE_PATTERN: &str = "(00) 00000-0000";

/// Mantém só os dígitos ASCII de `raw`.
pub fn only_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

// Aplica o padrão aos dígitos de `raw`. Separadores só entram
// quando existe um dígito depois deles; dígitos excedentes são descartados.
fn apply_pattern(raw: &str, pattern: &str) -> String {
    let digits = only_digits(raw);
    let mut digits = digits.chars().peekable();
    let mut out = String::with_capacity(pattern.len());
    let mut pending = String::new();

    for slot in pattern.chars() {
        if digits.peek().is_none() {
            break;
        }
        if slot == '0' {
            out.push_str(&pending);
            pending.clear();
            if let Some(d) = digits.next() {
                out.push(d);
            }
        } else {
            pending.push(slot);
        }
    }

    out
}

pub fn mask_cpf(raw: &str) -> String {
    apply_pattern(raw, CPF_PATTERN)
}

pub fn mask_cnpj(raw: &str) -> String {
    apply_pattern(raw, CNPJ_PATTERN)
}

/// Máscara do documento conforme o tipo de pessoa (CPF para PF, CNPJ para PJ).
pub fn mask_documento(tipo: TipoPessoa, raw: &str) -> String {
    match tipo {
        TipoPessoa::Fisica => mask_cpf(raw),
        TipoPessoa::Juridica => mask_cnpj(raw),
    }
}

pub fn mask_cep(raw: &str) -> String {
    apply_pattern(raw, CEP_PATTERN)
}

/// Fixo com 10 dígitos, celular com 11.
pub fn mask_telefone(raw: &str) -> String {
    if only_digits(raw).len() > 10 {
        apply_pattern(raw, MOBILE_PATTERN)
    } else {
        apply_pattern(raw, PHONE_PATTERN)
    }
}
