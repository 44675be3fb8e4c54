// src/services/periodo_service.rs
//
// Classificação de clientes por data de criação. Toda comparação de dia é
// feita DEPOIS de converter o timestamp UTC para o fuso do negócio; comparar
// UTC cru contra o "hoje" local erra por um dia perto da virada.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;

use crate::models::cliente::Cliente;
use crate::models::comissao::{ClientesPorData, PeriodoFiltro};

// Fuso fixo do negócio (a operação inteira roda em horário de Brasília)
pub const FUSO_NEGOCIO: Tz = Sao_Paulo;

/// Dia local (América/São Paulo) de um timestamp UTC.
pub fn dia_local(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&FUSO_NEGOCIO).date_naive()
}

/// O "hoje" de referência, no fuso do negócio.
pub fn hoje_negocio() -> NaiveDate {
    dia_local(Utc::now())
}

fn dia_do_cliente(cliente: &Cliente) -> Option<NaiveDate> {
    cliente.created_at.map(dia_local)
}

/// Organiza os clientes em quatro baldes disjuntos por dia de criação:
/// hoje, ontem, últimos 7 dias (de hoje−7 até hoje−2, de propósito sem
/// ontem/hoje para os cards não contarem duas vezes) e anteriores.
///
/// Cliente sem data de criação não entra em balde nenhum.
pub fn organize_by_date(clientes: &[Cliente], hoje: NaiveDate) -> ClientesPorData {
    let ontem = hoje - Days::new(1);
    let inicio_janela = hoje - Days::new(7);

    let mut baldes = ClientesPorData::default();

    for cliente in clientes {
        let Some(dia) = dia_do_cliente(cliente) else {
            continue;
        };

        if dia == hoje {
            baldes.hoje.push(cliente.clone());
        } else if dia == ontem {
            baldes.ontem.push(cliente.clone());
        } else if dia >= inicio_janela {
            // hoje−7 ..= hoje−2 (os dois dias mais recentes já têm balde próprio)
            baldes.ultimos_sete_dias.push(cliente.clone());
        } else {
            baldes.anteriores.push(cliente.clone());
        }
    }

    baldes
}

fn primeiro_dia_do_mes(hoje: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(hoje.year(), hoje.month(), 1).unwrap_or(hoje)
}

fn primeiro_dia_do_ano(hoje: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(hoje.year(), 1, 1).unwrap_or(hoje)
}

/// O seletor de período da UI ("active filter"). Diferente dos baldes acima,
/// os presets vão do início do período até agora, inclusive: "últimos 7
/// dias" aqui INCLUI hoje e ontem.
pub fn filter_by_periodo(
    clientes: &[Cliente],
    filtro: &PeriodoFiltro,
    hoje: NaiveDate,
) -> Vec<Cliente> {
    if *filtro == PeriodoFiltro::Todos {
        return clientes.to_vec();
    }

    clientes
        .iter()
        .filter(|cliente| {
            let Some(dia) = dia_do_cliente(cliente) else {
                return false;
            };
            match filtro {
                PeriodoFiltro::Todos => true,
                PeriodoFiltro::Hoje => dia == hoje,
                PeriodoFiltro::Ontem => dia == hoje - Days::new(1),
                PeriodoFiltro::Ultimos7Dias => dia >= hoje - Days::new(7) && dia <= hoje,
                PeriodoFiltro::EsteMes => dia >= primeiro_dia_do_mes(hoje) && dia <= hoje,
                PeriodoFiltro::EsteAno => dia >= primeiro_dia_do_ano(hoje) && dia <= hoje,
                // Fim inclusivo: o dia final conta por inteiro
                PeriodoFiltro::Personalizado { inicio, fim } => dia >= *inicio && dia <= *fim,
            }
        })
        .cloned()
        .collect()
}
