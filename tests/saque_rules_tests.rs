/// Testes do ciclo de vida da solicitação de saque (só a máquina de estados;
/// o caminho com banco fica fora daqui).
use cents_backend::models::saque::StatusSaque;
use cents_backend::services::saque_service::{efeito_no_cliente, transicao_valida, EfeitoNoCliente};

#[test]
fn pendente_aceita_aprovar_rejeitar_e_pagar() {
    assert!(transicao_valida(StatusSaque::Pendente, StatusSaque::Aprovado));
    assert!(transicao_valida(StatusSaque::Pendente, StatusSaque::Rejeitado));
    assert!(transicao_valida(StatusSaque::Pendente, StatusSaque::Pago));
}

#[test]
fn aprovado_so_aceita_pagar() {
    assert!(transicao_valida(StatusSaque::Aprovado, StatusSaque::Pago));
    assert!(!transicao_valida(StatusSaque::Aprovado, StatusSaque::Rejeitado));
    assert!(!transicao_valida(StatusSaque::Aprovado, StatusSaque::Pendente));
}

#[test]
fn estados_terminais_nao_aceitam_nada() {
    for terminal in [StatusSaque::Rejeitado, StatusSaque::Pago] {
        assert!(terminal.is_terminal());
        for destino in [
            StatusSaque::Pendente,
            StatusSaque::Aprovado,
            StatusSaque::Rejeitado,
            StatusSaque::Pago,
        ] {
            assert!(!transicao_valida(terminal, destino));
        }
    }
}

#[test]
fn pendente_e_aprovado_nao_sao_terminais() {
    assert!(!StatusSaque::Pendente.is_terminal());
    assert!(!StatusSaque::Aprovado.is_terminal());
}

#[test]
fn rejeitar_devolve_a_comissao_para_disponivel() {
    // Rejeição limpa `saque_solicitado` no cliente da solicitação
    assert_eq!(
        efeito_no_cliente(StatusSaque::Rejeitado),
        EfeitoNoCliente::LiberarComissao
    );
}

#[test]
fn pagar_marca_a_comissao_como_recebida() {
    assert_eq!(efeito_no_cliente(StatusSaque::Pago), EfeitoNoCliente::MarcarPaga);
}

#[test]
fn aprovar_nao_mexe_no_cliente() {
    assert_eq!(efeito_no_cliente(StatusSaque::Aprovado), EfeitoNoCliente::Nenhum);
    assert_eq!(efeito_no_cliente(StatusSaque::Pendente), EfeitoNoCliente::Nenhum);
}

#[test]
fn nenhum_estado_transiciona_para_si_mesmo() {
    for estado in [
        StatusSaque::Pendente,
        StatusSaque::Aprovado,
        StatusSaque::Rejeitado,
        StatusSaque::Pago,
    ] {
        assert!(!transicao_valida(estado, estado));
    }
}
