// src/forms/drafts.rs
//
// Rascunhos tipados de pessoa e endereço, compartilhados pelos formulários.
// Toda atualização é uma função pura que devolve um novo rascunho.

use crate::{
    common::{
        error::{validation_error, AppResult},
        mask::{mask_cep, mask_documento, mask_telefone, only_digits},
    },
    models::{
        cep::CepAddress,
        pessoa::{non_empty, Endereco, EnderecoPayload, Pessoa, PessoaPayload, TipoPessoa},
    },
};

// ---
// PESSOA
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PessoaField {
    Nome,
    RazaoSocial,
    Documento,
    InscricaoEstadual,
    InscricaoMunicipal,
}

impl PessoaField {
    pub fn is_company_only(&self) -> bool {
        matches!(
            self,
            PessoaField::RazaoSocial | PessoaField::InscricaoEstadual | PessoaField::InscricaoMunicipal
        )
    }
}

const PESSOA_FIELDS: [PessoaField; 5] = [
    PessoaField::Nome,
    PessoaField::RazaoSocial,
    PessoaField::Documento,
    PessoaField::InscricaoEstadual,
    PessoaField::InscricaoMunicipal,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PessoaDraft {
    pub id: Option<i64>,
    pub tipo: TipoPessoa,
    pub nome: String,
    pub razao_social: String,
    pub documento: String,
    pub inscricao_estadual: String,
    pub inscricao_municipal: String,
    // Dígitos como foram digitados, sem o corte da máscara do tipo atual
    documento_digits: String,
}

impl PessoaDraft {
    pub fn from_pessoa(pessoa: &Pessoa) -> Self {
        Self {
            id: pessoa.id,
            tipo: pessoa.tipo,
            nome: pessoa.nome.clone(),
            razao_social: pessoa.razao_social.clone().unwrap_or_default(),
            documento: mask_documento(pessoa.tipo, &pessoa.documento),
            inscricao_estadual: pessoa.inscricao_estadual.clone().unwrap_or_default(),
            inscricao_municipal: pessoa.inscricao_municipal.clone().unwrap_or_default(),
            documento_digits: only_digits(&pessoa.documento),
        }
    }

    pub fn get(&self, field: PessoaField) -> &str {
        match field {
            PessoaField::Nome => &self.nome,
            PessoaField::RazaoSocial => &self.razao_social,
            PessoaField::Documento => &self.documento,
            PessoaField::InscricaoEstadual => &self.inscricao_estadual,
            PessoaField::InscricaoMunicipal => &self.inscricao_municipal,
        }
    }

    /// Novo rascunho com um único campo alterado. O documento é mascarado
    /// conforme o tipo atual.
    pub fn with_field(&self, field: PessoaField, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            PessoaField::Nome => next.nome = value.to_string(),
            PessoaField::RazaoSocial => next.razao_social = value.to_string(),
            PessoaField::Documento => {
                next.documento = mask_documento(self.tipo, value);
                next.documento_digits = only_digits(value);
            }
            PessoaField::InscricaoEstadual => next.inscricao_estadual = value.to_string(),
            PessoaField::InscricaoMunicipal => next.inscricao_municipal = value.to_string(),
        }
        next
    }

    /// Troca PF/PJ: reaplica a máscara do documento e mantém os campos de PJ
    /// guardados, mesmo quando ficam ocultos.
    pub fn with_tipo(&self, tipo: TipoPessoa) -> Self {
        Self {
            tipo,
            documento: mask_documento(tipo, &self.documento_digits),
            ..self.clone()
        }
    }

    pub fn visible_fields(&self) -> Vec<PessoaField> {
        PESSOA_FIELDS
            .into_iter()
            .filter(|f| !f.is_company_only() || self.tipo.shows_company_fields())
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.id.is_none()
            && PESSOA_FIELDS
                .iter()
                .all(|f| self.get(*f).trim().is_empty())
    }

    // Nome e documento são obrigatórios em qualquer seção preenchida
    pub fn validate_required(&self, nome_field: &'static str, doc_field: &'static str) -> AppResult<()> {
        if self.nome.trim().is_empty() {
            return Err(validation_error(nome_field, "O nome é obrigatório."));
        }
        if only_digits(&self.documento).is_empty() {
            return Err(validation_error(doc_field, "O documento é obrigatório."));
        }
        Ok(())
    }

    // Campos de PJ ocultos não vão para o payload
    pub fn to_payload(&self, entidade_id: Option<i64>) -> PessoaPayload {
        let company = self.tipo.shows_company_fields();
        PessoaPayload {
            id: self.id,
            nome: self.nome.trim().to_string(),
            documento: self.documento.clone(),
            tipo: self.tipo,
            razao_social: company.then(|| non_empty(&self.razao_social)).flatten(),
            inscricao_estadual: company.then(|| non_empty(&self.inscricao_estadual)).flatten(),
            inscricao_municipal: company.then(|| non_empty(&self.inscricao_municipal)).flatten(),
            entidade_id,
        }
    }
}

// ---
// ENDEREÇO
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnderecoField {
    Cep,
    Logradouro,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    CodigoCidade,
    Estado,
    CodigoEstado,
    Telefone,
    Email,
}

const ENDERECO_FIELDS: [EnderecoField; 11] = [
    EnderecoField::Cep,
    EnderecoField::Logradouro,
    EnderecoField::Numero,
    EnderecoField::Complemento,
    EnderecoField::Bairro,
    EnderecoField::Cidade,
    EnderecoField::CodigoCidade,
    EnderecoField::Estado,
    EnderecoField::CodigoEstado,
    EnderecoField::Telefone,
    EnderecoField::Email,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnderecoDraft {
    pub id: Option<i64>,
    pub cep: String,
    pub logradouro: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub codigo_cidade: String,
    pub estado: String,
    pub codigo_estado: String,
    pub telefone: String,
    pub email: String,
}

impl EnderecoDraft {
    pub fn from_endereco(endereco: &Endereco) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            id: endereco.id,
            cep: mask_cep(&text(&endereco.cep)),
            logradouro: text(&endereco.logradouro),
            numero: text(&endereco.numero),
            complemento: text(&endereco.complemento),
            bairro: text(&endereco.bairro),
            cidade: text(&endereco.cidade),
            codigo_cidade: text(&endereco.codigo_cidade),
            estado: text(&endereco.estado),
            codigo_estado: text(&endereco.codigo_estado),
            telefone: mask_telefone(&text(&endereco.telefone)),
            email: text(&endereco.email),
        }
    }

    pub fn get(&self, field: EnderecoField) -> &str {
        match field {
            EnderecoField::Cep => &self.cep,
            EnderecoField::Logradouro => &self.logradouro,
            EnderecoField::Numero => &self.numero,
            EnderecoField::Complemento => &self.complemento,
            EnderecoField::Bairro => &self.bairro,
            EnderecoField::Cidade => &self.cidade,
            EnderecoField::CodigoCidade => &self.codigo_cidade,
            EnderecoField::Estado => &self.estado,
            EnderecoField::CodigoEstado => &self.codigo_estado,
            EnderecoField::Telefone => &self.telefone,
            EnderecoField::Email => &self.email,
        }
    }

    pub fn with_field(&self, field: EnderecoField, value: &str) -> Self {
        let mut next = self.clone();
        let value = value.to_string();
        match field {
            EnderecoField::Cep => next.cep = mask_cep(&value),
            EnderecoField::Logradouro => next.logradouro = value,
            EnderecoField::Numero => next.numero = value,
            EnderecoField::Complemento => next.complemento = value,
            EnderecoField::Bairro => next.bairro = value,
            EnderecoField::Cidade => next.cidade = value,
            EnderecoField::CodigoCidade => next.codigo_cidade = value,
            EnderecoField::Estado => next.estado = value,
            EnderecoField::CodigoEstado => next.codigo_estado = value,
            EnderecoField::Telefone => next.telefone = mask_telefone(&value),
            EnderecoField::Email => next.email = value,
        }
        next
    }

    /// Resultado do CEP: sobrescreve só logradouro, bairro, cidade e estado.
    pub fn with_cep_address(&self, address: &CepAddress) -> Self {
        Self {
            logradouro: address.logradouro.clone(),
            bairro: address.bairro.clone(),
            cidade: address.cidade.clone(),
            estado: address.estado.clone(),
            ..self.clone()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.id.is_none()
            && ENDERECO_FIELDS
                .iter()
                .all(|f| self.get(*f).trim().is_empty())
    }

    pub fn validate_required(&self, cep_field: &'static str) -> AppResult<()> {
        if only_digits(&self.cep).len() != 8 {
            return Err(validation_error(cep_field, "Informe um CEP válido para o endereço."));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> EnderecoPayload {
        EnderecoPayload {
            id: self.id,
            cep: self.cep.clone(),
            logradouro: non_empty(&self.logradouro),
            numero: non_empty(&self.numero),
            complemento: non_empty(&self.complemento),
            bairro: non_empty(&self.bairro),
            cidade: non_empty(&self.cidade),
            codigo_cidade: non_empty(&self.codigo_cidade),
            estado: non_empty(&self.estado),
            codigo_estado: non_empty(&self.codigo_estado),
            telefone: non_empty(&self.telefone),
            email: non_empty(&self.email),
        }
    }

    // Seção opcional: em branco não vai para o payload
    pub fn to_optional_payload(&self) -> Option<EnderecoPayload> {
        (!self.is_blank()).then(|| self.to_payload())
    }
}
