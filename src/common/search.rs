// src/common/search.rs

/// Campos de exibição usados pela busca das listagens.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Filtro em memória: substring sem diferenciar maiúsculas em qualquer campo.
/// Termo vazio (ou só de espaços) devolve tudo. Fora isso o termo vale como digitado.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    if term.trim().is_empty() {
        return items.iter().collect();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
