//! Definición de la línea de comandos (`clap` derive).

use std::path::PathBuf;

use campo_domain::{Activity, RiskClass, Role};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "diario-campo")]
#[command(about = "Acompanhamento de processos de inspeção sanitária sobre uma tabela compartilhada")]
#[command(version)]
pub struct Cli {
    /// Usuário da sessão
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Senha (padrão: `CAMPO_PASSWORD`)
    #[arg(long, global = true, env = "CAMPO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Saída JSON para os relatórios
    #[arg(long, global = true)]
    pub json: bool,

    /// Logs de depuração
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cria a tabela de processos vazia (só cabeçalho)
    Init,

    /// Imprime uma linha para a tabela de credenciais
    HashPassword {
        username: String,
        #[arg(long)]
        role: Role,
    },

    /// Registra uma nova inspeção
    Create {
        #[arg(long)]
        establishment: String,
        #[arg(long)]
        cnpj: String,
        #[arg(long)]
        activity: Activity,
        #[arg(long)]
        risk: RiskClass,
        /// Data da visita (YYYY-MM-DD, padrão: hoje)
        #[arg(long)]
        inspection_date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        observations: String,
        /// Prazo de retorno do inspetor (padrão: hoje + 15 dias)
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Marca um processo como concluído
    Conclude {
        id: u64,
        /// Data de conclusão (padrão: hoje)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Define o prazo obrigatório da coordenação
    EditDeadline {
        id: u64,
        /// Novo prazo (padrão: o sugerido para o processo)
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Adiciona um comentário ao histórico
    Comment { id: u64, text: String },

    /// Painel de processos visíveis com a situação do prazo
    Board {
        /// Situações a incluir (repetível; padrão: "Em Andamento")
        #[arg(long = "status")]
        statuses: Vec<String>,
        /// Incluir todas as situações
        #[arg(long, conflicts_with = "statuses")]
        all: bool,
        #[arg(long)]
        inspector: Option<String>,
    },

    /// Contadores de alerta
    Alerts,

    /// Indicadores de produção (coordenação e gerência)
    Indicators,

    /// Exporta a tabela completa em CSV (coordenação e gerência)
    Export {
        /// Arquivo de destino (padrão: saída padrão)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
