// tests/usuario_flow.rs

mod common;

use serde_json::json;

use common::MockBackend;
use maestro_admin::{
    common::notice::NoticeKind,
    forms::{CloseRequest, FormPhase, PessoaField, PessoaModo, ReplicationState, UsuarioAction, UsuarioForm},
    pages::UsuarioPage,
    services::UsuarioService,
};

const EMAIL: &str = "ana@maestro.com";

fn preencher(form: &mut UsuarioForm) {
    form.dispatch(UsuarioAction::Email(EMAIL.into()));
    form.dispatch(UsuarioAction::Senha("123456".into()));
    form.dispatch(UsuarioAction::Pessoa(PessoaField::Nome, "Ana Souza".into()));
    form.dispatch(UsuarioAction::Pessoa(PessoaField::Documento, "12345678901".into()));
}

fn other_entities_path() -> String {
    format!("/usuario/email/{}/other-entities", urlencoding::encode(EMAIL))
}

#[tokio::test]
async fn email_in_other_entity_offers_replication() {
    let backend = MockBackend::start().await;
    backend.respond(
        "GET",
        &other_entities_path(),
        200,
        json!([{ "id": 42, "email": EMAIL, "entidade": { "id": 1, "nome": "Matriz" } }]),
    );
    backend.respond("POST", "/usuario/42/replicate", 201, json!({ "id": 42, "email": EMAIL, "entidadeId": 2 }));
    let (api, _) = backend.api();
    let service = UsuarioService::new(api);

    let mut form = UsuarioForm::new(2);
    preencher(&mut form);

    assert!(form.submit(&service).await.is_none());
    assert_eq!(form.phase(), FormPhase::Editing);
    let ReplicationState::CollisionDetected { matches } = form.replication() else {
        panic!("esperava colisão, veio {:?}", form.replication());
    };
    assert_eq!(matches[0].entidade_nome(), "Matriz");
    assert_eq!(form.notices().last().unwrap().kind, NoticeKind::Info);
    assert!(backend.calls("POST", "/usuario").is_empty());

    let replicated = form.replicate(0, &service).await.expect("replicado");
    assert_eq!(replicated.id, 42);
    assert_eq!(form.phase(), FormPhase::Success);
    assert_eq!(form.replication(), &ReplicationState::Idle);

    let call = &backend.calls("POST", "/usuario/42/replicate")[0];
    assert_eq!(call.body, json!({ "entidadeId": 2 }));
}

#[tokio::test]
async fn email_with_reserved_characters_stays_in_one_path_segment() {
    let email = "ana#vendas@maestro.com";
    let path = "/usuario/email/ana%23vendas%40maestro.com/other-entities";
    let backend = MockBackend::start().await;
    backend.respond("GET", path, 200, json!([{ "id": 8, "email": email, "entidade": { "id": 1, "nome": "Matriz" } }]));
    let (api, _) = backend.api();
    let service = UsuarioService::new(api);

    let mut form = UsuarioForm::new(2);
    preencher(&mut form);
    form.dispatch(UsuarioAction::Email(email.into()));

    assert!(form.submit(&service).await.is_none());
    assert!(matches!(form.replication(), ReplicationState::CollisionDetected { .. }));
    let gets: Vec<_> = backend.requests().into_iter().filter(|r| r.method == "GET").collect();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].path, path);
}

#[tokio::test]
async fn failed_replication_offers_the_choices_again() {
    let backend = MockBackend::start().await;
    backend.respond("GET", &other_entities_path(), 200, json!([{ "id": 42, "email": EMAIL }]));
    backend.respond("POST", "/usuario/42/replicate", 500, json!({ "message": "Falhou" }));
    let (api, _) = backend.api();
    let service = UsuarioService::new(api);

    let mut form = UsuarioForm::new(2);
    preencher(&mut form);
    form.submit(&service).await;

    assert!(form.replicate(0, &service).await.is_none());
    assert!(matches!(form.replication(), ReplicationState::CollisionDetected { .. }));
    assert_eq!(form.notices().last().unwrap().message, "Falhou");

    form.dismiss_collision();
    assert_eq!(form.replication(), &ReplicationState::Idle);
}

#[tokio::test]
async fn new_email_creates_user_with_inline_pessoa() {
    let backend = MockBackend::start().await;
    backend.respond("GET", &other_entities_path(), 200, json!([]));
    backend.respond("POST", "/usuario", 201, json!({ "data": { "id": 9, "email": EMAIL } }));
    let (api, _) = backend.api();
    let service = UsuarioService::new(api);

    let mut form = UsuarioForm::new(2);
    preencher(&mut form);
    let created = form.submit(&service).await.expect("criado");
    assert_eq!(created.id, 9);

    let body = &backend.calls("POST", "/usuario")[0].body;
    assert_eq!(body["email"], EMAIL);
    assert_eq!(body["senha"], "123456");
    assert_eq!(body["entidadeId"], 2);
    assert_eq!(body["pessoa"]["nome"], "Ana Souza");
    assert!(body.get("pessoaId").is_none());
}

#[tokio::test]
async fn collision_lookup_failure_fails_the_submit() {
    let backend = MockBackend::start().await;
    backend.respond("GET", &other_entities_path(), 503, json!({ "message": "Indisponível" }));
    let (api, _) = backend.api();
    let service = UsuarioService::new(api);

    let mut form = UsuarioForm::new(2);
    preencher(&mut form);
    assert!(form.submit(&service).await.is_none());
    assert_eq!(form.replication(), &ReplicationState::Idle);
    assert_eq!(form.notices().last().unwrap().kind, NoticeKind::Error);
    assert!(backend.calls("POST", "/usuario").is_empty());
}

#[tokio::test]
async fn edit_with_existing_pessoa_skips_collision_check() {
    let backend = MockBackend::start().await;
    backend.respond(
        "GET",
        "/usuario/entidade/2",
        200,
        json!([{ "id": 5, "email": EMAIL, "ativo": true, "pessoaId": 77 }]),
    );
    backend.respond("PATCH", "/usuario/5", 200, json!({ "id": 5, "email": EMAIL, "ativo": false }));
    let (api, _) = backend.api();
    let service = UsuarioService::new(api);
    let mut page = UsuarioPage::new(service.clone(), 2);
    assert!(page.load().await);

    let mut form = page.open_edit(5).expect("usuário 5");
    assert_eq!(form.draft().pessoa_modo, PessoaModo::Existente);
    assert_eq!(form.request_close(), CloseRequest::Closed);

    form.dispatch(UsuarioAction::Ativo(false));
    assert_eq!(form.request_close(), CloseRequest::NeedsConfirmation);
    form.cancel_discard();

    let updated = form.submit(&service).await.expect("atualizado");
    assert!(!updated.ativo);
    assert!(backend.calls("GET", &other_entities_path()).is_empty());

    let body = &backend.calls("PATCH", "/usuario/5")[0].body;
    assert_eq!(body["pessoaId"], 77);
    assert_eq!(body["ativo"], false);
    // Senha em branco na edição não é enviada
    assert!(body.get("senha").is_none());
}
