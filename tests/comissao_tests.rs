/// Testes do motor de comissões: a tabela dupla do fluxo "Cliente Novo",
/// os três baldes de elegibilidade e o resumo agregado.
mod common;

use std::collections::HashSet;

use rust_decimal::Decimal;

use cents_backend::models::cliente::status;
use cents_backend::models::comissao::PapelComissao;
use cents_backend::services::comissao_service::{
    comissao_padrao, commission_for_display, dual_commission, has_valid_sale_value,
    is_comissao_pendente, is_disponivel_para_saque, is_ja_recebida, partition_carteira,
    regras_cliente_novo, summarize, CacheResumo,
};

use common::{cliente, com_status, com_venda};

#[cfg(test)]
mod tabela_dupla {
    use super::*;

    #[test]
    fn venda_de_500_paga_40_para_vendedor_e_100_para_gestor() {
        let venda = Decimal::from(500);
        assert_eq!(dual_commission(venda, PapelComissao::Vendedor), Decimal::from(40));
        assert_eq!(dual_commission(venda, PapelComissao::Gestor), Decimal::from(100));
    }

    #[test]
    fn venda_de_350_paga_30_para_vendedor_e_80_para_gestor() {
        let venda = Decimal::from(350);
        assert_eq!(dual_commission(venda, PapelComissao::Vendedor), Decimal::from(30));
        assert_eq!(dual_commission(venda, PapelComissao::Gestor), Decimal::from(80));
    }

    #[test]
    fn valor_fora_da_tabela_rende_zero() {
        // Busca exata: nada de interpolar nem arredondar
        for fora in [0, 100, 349, 351, 499, 501, 999] {
            let venda = Decimal::from(fora);
            assert_eq!(dual_commission(venda, PapelComissao::Vendedor), Decimal::ZERO);
            assert_eq!(dual_commission(venda, PapelComissao::Gestor), Decimal::ZERO);
        }
    }

    #[test]
    fn so_350_e_500_sao_valores_de_venda_validos() {
        assert!(has_valid_sale_value(Some(Decimal::from(350))));
        assert!(has_valid_sale_value(Some(Decimal::from(500))));
        assert!(!has_valid_sale_value(Some(Decimal::from(400))));
        assert!(!has_valid_sale_value(None));
    }

    #[test]
    fn a_tabela_exposta_tem_as_duas_linhas() {
        let regras = regras_cliente_novo();
        assert_eq!(regras.len(), 2);
        assert_eq!(regras[0].valor_venda, Decimal::from(500));
        assert_eq!(regras[1].comissao_gestor, Decimal::from(80));
    }
}

#[cfg(test)]
mod valor_de_exibicao {
    use super::*;

    #[test]
    fn cliente_novo_com_venda_valida_usa_a_tabela() {
        let c = com_venda(cliente(1), 350);
        assert_eq!(commission_for_display(&c, PapelComissao::Gestor), Decimal::from(80));
    }

    #[test]
    fn cliente_novo_sem_venda_valida_assume_500() {
        // Heurística assumida: sem valor de venda registrado, trata como 500
        let sem_venda = cliente(1);
        assert_eq!(
            commission_for_display(&sem_venda, PapelComissao::Gestor),
            Decimal::from(100)
        );
        assert_eq!(
            commission_for_display(&sem_venda, PapelComissao::Vendedor),
            Decimal::from(40)
        );

        let venda_invalida = com_venda(cliente(2), 400);
        assert_eq!(
            commission_for_display(&venda_invalida, PapelComissao::Gestor),
            Decimal::from(100)
        );
    }

    #[test]
    fn fora_do_fluxo_cliente_novo_vale_o_banco_ou_o_padrao_de_60() {
        let mut c = com_status(cliente(1), status::OTIMIZACAO);
        assert_eq!(commission_for_display(&c, PapelComissao::Gestor), comissao_padrao());

        c.valor_comissao = Some(Decimal::from(75));
        assert_eq!(commission_for_display(&c, PapelComissao::Gestor), Decimal::from(75));
    }
}

#[cfg(test)]
mod elegibilidade {
    use super::*;

    #[test]
    fn campanha_encerrada_nao_e_pendente() {
        assert!(!is_comissao_pendente(&com_status(cliente(1), status::OFF)));
        assert!(!is_comissao_pendente(&com_status(cliente(2), status::REEMBOLSO)));
        assert!(is_comissao_pendente(&com_status(cliente(3), status::NO_AR)));
    }

    #[test]
    fn comissao_paga_nunca_e_pendente() {
        let mut c = cliente(1);
        c.comissao_paga = true;
        assert!(!is_comissao_pendente(&c));
    }

    #[test]
    fn disponivel_exige_otimizacao_sem_saque_em_andamento() {
        let pagas = HashSet::new();

        let em_otimizacao = com_status(cliente(1), status::OTIMIZACAO);
        assert!(is_disponivel_para_saque(&em_otimizacao, &pagas));

        // Cliente Novo ainda não otimizou: nada de sacar
        assert!(!is_disponivel_para_saque(&cliente(2), &pagas));

        let mut com_saque = com_status(cliente(3), status::OTIMIZACAO);
        com_saque.saque_solicitado = true;
        assert!(!is_disponivel_para_saque(&com_saque, &pagas));
    }

    #[test]
    fn saque_pago_move_o_cliente_para_recebidas() {
        let pagas: HashSet<i64> = [1].into_iter().collect();

        let c = com_status(cliente(1), status::OTIMIZACAO);
        assert!(!is_disponivel_para_saque(&c, &pagas));
        assert!(is_ja_recebida(&c, &pagas));
    }

    #[test]
    fn pendente_e_disponivel_se_sobrepoem_de_proposito() {
        // Cliente em Otimização, nada pago nem solicitado: responde "sim"
        // às duas perguntas e aparece nos dois cards.
        let pagas = HashSet::new();
        let c = com_status(cliente(1), status::OTIMIZACAO);

        assert!(is_comissao_pendente(&c));
        assert!(is_disponivel_para_saque(&c, &pagas));

        let carteira = partition_carteira(std::slice::from_ref(&c), &pagas);
        assert_eq!(carteira.pendentes.len(), 1);
        assert_eq!(carteira.disponiveis.len(), 1);
        assert!(carteira.recebidas.is_empty());
    }
}

#[cfg(test)]
mod resumo {
    use super::*;

    #[test]
    fn carteira_vazia_vira_resumo_zerado() {
        let carteira = partition_carteira(&[], &HashSet::new());
        let resumo = summarize(&carteira);

        assert_eq!(resumo.pendentes.quantidade, 0);
        assert_eq!(resumo.pendentes.valor_total, Decimal::ZERO);
        assert_eq!(resumo.disponiveis.quantidade, 0);
        assert_eq!(resumo.recebidas.quantidade, 0);
    }

    #[test]
    fn comissao_ausente_soma_o_padrao_de_60_nunca_zero() {
        // Dois pendentes sem valor_comissao: o total é 120, não 0
        let clientes = vec![cliente(1), cliente(2)];
        let carteira = partition_carteira(&clientes, &HashSet::new());
        let resumo = summarize(&carteira);

        assert_eq!(resumo.pendentes.quantidade, 2);
        assert_eq!(resumo.pendentes.valor_total, Decimal::from(120));
    }

    #[test]
    fn valores_explicitos_somam_como_estao() {
        let mut a = cliente(1);
        a.valor_comissao = Some(Decimal::from(100));
        let mut b = cliente(2);
        b.valor_comissao = Some(Decimal::from(80));

        let carteira = partition_carteira(&[a, b], &HashSet::new());
        let resumo = summarize(&carteira);

        assert_eq!(resumo.pendentes.valor_total, Decimal::from(180));
    }
}

#[cfg(test)]
mod cache_de_resumo {
    use super::*;
    use cents_backend::models::comissao::ResumoComissoes;

    #[tokio::test]
    async fn sem_invalidacao_o_resultado_e_gravado() {
        let cache = CacheResumo::default();

        let geracao = cache.geracao().await;
        let gravou = cache
            .guardar(geracao, "ana".to_string(), ResumoComissoes::default())
            .await;

        assert!(gravou);
        assert!(cache.get("ana").await.is_some());
    }

    #[tokio::test]
    async fn invalidacao_durante_o_computo_descarta_o_resultado() {
        // Sequência da corrida: captura a geração, uma escrita invalida o
        // cache no meio do cômputo, e o resultado (já velho) tenta entrar.
        let cache = CacheResumo::default();
        let geracao = cache.geracao().await;

        cache.invalidar().await;

        let gravou = cache
            .guardar(geracao, "ana".to_string(), ResumoComissoes::default())
            .await;

        assert!(!gravou, "resumo computado antes da invalidação não pode ser servido");
        assert!(cache.get("ana").await.is_none());
    }

    #[tokio::test]
    async fn invalidar_tambem_derruba_o_que_ja_estava_gravado() {
        let cache = CacheResumo::default();
        let geracao = cache.geracao().await;
        cache
            .guardar(geracao, "ana".to_string(), ResumoComissoes::default())
            .await;

        cache.invalidar().await;

        assert!(cache.get("ana").await.is_none());
    }
}
