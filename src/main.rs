// src/main.rs

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use maestro_admin::{
    common::{
        error::AppError,
        notice::{Notice, NoticeKind},
    },
    config::{AppConfig, AppState},
    pages::{ClientePage, LoginPage, LoginStep, SupplierPage, UsuarioPage},
    routes::{resolve, Resolution},
    session::Session,
};

const USAGE: &str = "\
uso: maestro-admin <comando> [argumentos]

  login <email> <senha>        inicia a sessão
  logout                       encerra a sessão
  entidades                    lista as entidades
  entidade <id>                troca a entidade corrente
  clientes [termo]             lista clientes (busca opcional)
  excluir-cliente <id>         exclui um cliente após confirmação
  usuarios [termo]             lista usuários da entidade corrente
  fornecedores [termo]         lista fornecedores
  cep <cep>                    consulta um endereço no ViaCEP
  rota <caminho>               mostra como a rota seria resolvida";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::new(config).context("Falha ao inicializar o estado da aplicação.")?;
    let mut session = state.session();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };
    let arg = |i: usize| args.get(i).map(String::as_str);

    match command.as_str() {
        "login" => {
            let (Some(email), Some(senha)) = (arg(1), arg(2)) else {
                bail!("uso: maestro-admin login <email> <senha>");
            };
            login(&state, &mut session, email, senha).await?;
        }
        "logout" => {
            let route = session.logout()?;
            println!("Sessão encerrada. Próxima rota: {}", route.path());
        }
        "rota" => {
            let path = arg(1).unwrap_or("/");
            match resolve(path, &session) {
                Resolution::Render(route) => println!("Renderiza {}", route.path()),
                Resolution::Redirect(route) => println!("Redireciona para {}", route.path()),
                Resolution::NotFound => println!("Rota não encontrada: {path}"),
            }
        }
        "cep" => {
            let cep = arg(1).context("informe o CEP")?;
            match state.cep_lookup.lookup(cep).await {
                Ok(Some(address)) => println!(
                    "{}, {} - {}/{}",
                    address.logradouro, address.bairro, address.cidade, address.estado
                ),
                Ok(None) => println!("CEP não encontrado."),
                Err(err) => print_notice(&Notice::from(&err)),
            }
        }
        "fornecedores" => {
            require_login(&session)?;
            let mut page = SupplierPage::new(state.supplier_service.clone());
            page.load();
            page.set_search(arg(1).unwrap_or_default());
            for s in page.filtered() {
                println!("{:>4}  {:<8} {:<32} {:<20} {}", s.id, s.code, s.company_name, s.document, s.status.label());
            }
            page.take_notices().iter().for_each(print_notice);
        }
        "entidades" => {
            require_login(&session)?;
            match state.entidade_service.list().await {
                Ok(entidades) => {
                    for e in entidades {
                        let atual = if session.entidade_id() == Some(e.id) { "*" } else { " " };
                        println!("{atual}{:>4}  {}", e.id, e.nome);
                    }
                }
                Err(err) => print_notice(&Notice::from(&err)),
            }
        }
        "entidade" => {
            require_login(&session)?;
            let id: i64 = arg(1).context("informe o id da entidade")?.parse()?;
            session.select_entidade(id)?;
            println!("Entidade corrente: {id}");
        }
        "clientes" => {
            require_login(&session)?;
            let mut page = ClientePage::new(state.cliente_service.clone());
            page.load().await;
            page.set_search(arg(1).unwrap_or_default());
            for c in page.filtered() {
                println!("{:>4}  {:<40} {}", c.id, c.pessoa.nome, c.pessoa.documento);
            }
            page.take_notices().iter().for_each(print_notice);
        }
        "excluir-cliente" => {
            require_login(&session)?;
            let id: i64 = arg(1).context("informe o id do cliente")?.parse()?;
            let mut page = ClientePage::new(state.cliente_service.clone());
            page.request_delete(id);
            if prompt(&format!("Excluir o cliente {id}? [s/N] "))?.eq_ignore_ascii_case("s") {
                page.confirm_delete().await;
            } else {
                page.cancel_delete();
            }
            page.take_notices().iter().for_each(print_notice);
        }
        "usuarios" => {
            require_login(&session)?;
            let entidade_id = session.entidade_id().context("nenhuma entidade selecionada")?;
            let mut page = UsuarioPage::new(state.usuario_service.clone(), entidade_id);
            page.load().await;
            page.set_search(arg(1).unwrap_or_default());
            for u in page.filtered() {
                let status = if u.ativo { "ativo" } else { "inativo" };
                println!("{:>4}  {:<32} {:<28} {}", u.id, u.email, u.nome(), status);
            }
            page.take_notices().iter().for_each(print_notice);
        }
        other => {
            eprintln!("Comando desconhecido: {other}\n\n{USAGE}");
        }
    }

    Ok(())
}

async fn login(state: &AppState, session: &mut Session, email: &str, senha: &str) -> anyhow::Result<()> {
    let mut page = LoginPage::new(state.auth_service.clone());
    page.set_email(email);
    page.set_senha(senha);

    let mut route = page.submit(session).await;
    if page.step() == LoginStep::ChangePassword {
        page.take_notices().iter().for_each(print_notice);
        let nova = prompt("Nova senha: ")?;
        page.set_nova_senha(&nova);
        if page.submit_change_password().await {
            route = page.submit(session).await;
        }
    }

    page.take_notices().iter().for_each(print_notice);
    if let Some(route) = route {
        println!("Próxima rota: {}", route.path());
    }
    Ok(())
}

fn require_login(session: &Session) -> anyhow::Result<()> {
    if !session.is_authenticated() {
        bail!(AppError::NotAuthenticated.user_message());
    }
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_notice(notice: &Notice) {
    let tag = match notice.kind {
        NoticeKind::Success => "✅",
        NoticeKind::Info => "ℹ️",
        NoticeKind::Warning => "⚠️",
        NoticeKind::Error => "❌",
    };
    println!("{tag} {}", notice.message);
}
