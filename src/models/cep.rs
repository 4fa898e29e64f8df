// src/models/cep.rs

use serde::Deserialize;
use serde_json::Value;

// Resposta crua do ViaCEP (GET /ws/{cep}/json/)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViaCepResponse {
    pub cep: Option<String>,
    pub logradouro: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,
    pub ibge: Option<String>,
    // Vem como `true` ou "true" quando o CEP não existe
    pub erro: Option<Value>,
}

impl ViaCepResponse {
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => s != "false",
            Some(_) => true,
        }
    }
}

// O que a consulta devolve para o formulário
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CepAddress {
    pub logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub codigo_cidade: Option<String>,
}

impl From<ViaCepResponse> for CepAddress {
    fn from(resp: ViaCepResponse) -> Self {
        Self {
            logradouro: resp.logradouro.unwrap_or_default(),
            bairro: resp.bairro.unwrap_or_default(),
            cidade: resp.localidade.unwrap_or_default(),
            estado: resp.uf.unwrap_or_default(),
            codigo_cidade: resp.ibge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_erro_flag_variants() {
        let hit: ViaCepResponse = serde_json::from_value(json!({ "cep": "01310-100" })).unwrap();
        assert!(!hit.is_not_found());

        let miss: ViaCepResponse = serde_json::from_value(json!({ "erro": true })).unwrap();
        assert!(miss.is_not_found());

        let miss: ViaCepResponse = serde_json::from_value(json!({ "erro": "true" })).unwrap();
        assert!(miss.is_not_found());
    }

    #[test]
    fn test_maps_localidade_and_uf() {
        let resp: ViaCepResponse = serde_json::from_value(json!({
            "logradouro": "Avenida Paulista", "bairro": "Bela Vista",
            "localidade": "São Paulo", "uf": "SP", "ibge": "3550308"
        }))
        .unwrap();
        let addr = CepAddress::from(resp);
        assert_eq!(addr.cidade, "São Paulo");
        assert_eq!(addr.estado, "SP");
        assert_eq!(addr.codigo_cidade.as_deref(), Some("3550308"));
    }
}
