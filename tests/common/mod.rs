// Helpers compartilhados: fábrica de clientes para os testes de
// classificação (sem banco, tudo lógica pura). Nem todo binário de teste
// usa todos os helpers.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use cents_backend::models::cliente::{status, Cliente};

pub fn cliente(id: i64) -> Cliente {
    Cliente {
        id,
        nome_cliente: format!("Cliente {id}"),
        email_cliente: None,
        telefone: None,
        vendedor: Some("joao.vendedor@trafegoporcents.com".to_string()),
        email_gestor: Some("ana.gestora@trafegoporcents.com".to_string()),
        status_campanha: Some(status::CLIENTE_NOVO.to_string()),
        created_at: None,
        valor_comissao: None,
        comissao: Some("Pendente".to_string()),
        comissao_paga: false,
        eh_ultimo_pago: false,
        saque_solicitado: false,
        valor_venda_inicial: None,
    }
}

pub fn cliente_criado_em(id: i64, created_at: DateTime<Utc>) -> Cliente {
    Cliente {
        created_at: Some(created_at),
        ..cliente(id)
    }
}

pub fn com_status(mut c: Cliente, status_campanha: &str) -> Cliente {
    c.status_campanha = Some(status_campanha.to_string());
    c
}

pub fn com_venda(mut c: Cliente, valor: i64) -> Cliente {
    c.valor_venda_inicial = Some(Decimal::from(valor));
    c
}
