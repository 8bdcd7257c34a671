// case.rs
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::comments::{CommentEntry, CommentLog};
use crate::dates::format_display;
use crate::DomainError;

/// Plazo de retorno por defecto fijado al abrir un caso (días).
pub const DEFAULT_RETURN_DAYS: i64 = 15;
/// Largo máximo de un CNPJ con máscara (`00.000.000/0000-00`).
pub const CNPJ_MAX_LEN: usize = 18;
/// Etiqueta agregada a las entradas de la coordinación en el historial.
pub const COORDINATION_TAG: &str = "COORD";

/// Identificador numérico de un caso. `0` sólo aparece en filas cuyo ID
/// persistido no era numérico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub u64);

impl CaseId {
    /// Siguiente ID libre: `max + 1`, o `1` en una tabla vacía.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si el mayor ID ya es `u64::MAX`.
    pub fn next_after<'a, I>(existing: I) -> Result<CaseId, DomainError>
        where I: IntoIterator<Item = &'a CaseId>
    {
        match existing.into_iter().max() {
            None => Ok(CaseId(1)),
            Some(max) => max.0
                            .checked_add(1)
                            .map(CaseId)
                            .ok_or_else(|| DomainError::ValidationError(format!("não há ID livre após {max}"))),
        }
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Situación del proceso tal como se persiste en la columna `status`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseStatus {
    InProgress,
    Concluded,
    /// Literal desconocido (p.ej. `Indeferido` o celda vacía); se conserva
    /// tal cual para no alterar la tabla al reescribirla.
    Other(String),
}

impl CaseStatus {
    pub const IN_PROGRESS: &'static str = "Em Andamento";
    pub const CONCLUDED: &'static str = "Concluído";

    pub fn from_stored(raw: &str) -> Self {
        match raw.trim() {
            Self::IN_PROGRESS => CaseStatus::InProgress,
            Self::CONCLUDED => CaseStatus::Concluded,
            other => CaseStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CaseStatus::InProgress => Self::IN_PROGRESS,
            CaseStatus::Concluded => Self::CONCLUDED,
            CaseStatus::Other(s) => s,
        }
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self, CaseStatus::Concluded)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, CaseStatus::InProgress)
    }
}

impl From<String> for CaseStatus {
    fn from(s: String) -> Self {
        CaseStatus::from_stored(&s)
    }
}

impl From<CaseStatus> for String {
    fn from(s: CaseStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atividade principal del establecimiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Alimentos,
    #[serde(rename = "Saúde")]
    Saude,
    Saneantes,
    #[serde(rename = "Cosméticos")]
    Cosmeticos,
    Outro,
}

impl Activity {
    pub const ALL: [Activity; 5] =
        [Activity::Alimentos, Activity::Saude, Activity::Saneantes, Activity::Cosmeticos, Activity::Outro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Alimentos => "Alimentos",
            Activity::Saude => "Saúde",
            Activity::Saneantes => "Saneantes",
            Activity::Cosmeticos => "Cosméticos",
            Activity::Outro => "Outro",
        }
    }
}

impl FromStr for Activity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let folded = wanted.to_lowercase();
        Activity::ALL.into_iter()
                     .find(|a| a.as_str().to_lowercase() == folded)
                     .ok_or_else(|| DomainError::ValidationError(format!("atividade desconhecida: {wanted}")))
    }
}

/// Classificação de risco del establecimiento. El orden de `ALL` es el
/// usado en los indicadores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskClass {
    Alto,
    #[serde(rename = "Médio")]
    Medio,
    Baixo,
}

impl RiskClass {
    pub const ALL: [RiskClass; 3] = [RiskClass::Alto, RiskClass::Medio, RiskClass::Baixo];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClass::Alto => "Alto",
            RiskClass::Medio => "Médio",
            RiskClass::Baixo => "Baixo",
        }
    }
}

impl FromStr for RiskClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let folded = wanted.to_lowercase();
        RiskClass::ALL.into_iter()
                      .find(|r| r.as_str().to_lowercase() == folded)
                      .ok_or_else(|| DomainError::ValidationError(format!("risco desconhecido: {wanted}")))
    }
}

/// Datos capturados en el formulario de nueva inspección.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCase {
    pub establishment: String,
    pub cnpj: String,
    pub activity: Activity,
    pub risk: RiskClass,
    /// Fecha de la visita; por defecto el día de creación.
    pub inspection_date: Option<NaiveDate>,
    pub observations: String,
    /// Plazo del inspector; por defecto creación + 15 días.
    pub inspector_due_date: Option<NaiveDate>,
}

impl NewCase {
    pub fn validate(&self, today: NaiveDate) -> Result<(), DomainError> {
        if self.establishment.trim().is_empty() || self.cnpj.trim().is_empty() {
            return Err(DomainError::ValidationError("nome do estabelecimento e CNPJ são obrigatórios".into()));
        }
        if self.cnpj.trim().chars().count() > CNPJ_MAX_LEN {
            return Err(DomainError::ValidationError(format!("CNPJ excede {CNPJ_MAX_LEN} caracteres")));
        }
        if let Some(due) = self.inspector_due_date {
            if due < today {
                return Err(DomainError::ValidationError(format!("prazo do inspetor {} anterior a hoje",
                                                                format_display(due))));
            }
        }
        Ok(())
    }
}

/// Una fila de la tabla compartida: un proceso de inspección desde su
/// apertura hasta la conclusión.
///
/// Los campos descriptivos son públicos para el mapeo fila <-> caso; las
/// transiciones de ciclo de vida pasan por los métodos, que validan el estado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub owner_id: String,
    pub establishment: String,
    pub cnpj: String,
    pub activity: String,
    pub risk: String,
    pub inspection_date: Option<NaiveDate>,
    pub observations: String,
    pub inspector_due_date: Option<NaiveDate>,
    pub coordinator_due_date: Option<NaiveDate>,
    pub status: CaseStatus,
    pub comments: CommentLog,
    pub completion_date: Option<NaiveDate>,
}

impl Case {
    /// Abre un caso nuevo en `Em Andamento` con los valores por defecto del
    /// formulario.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si `new` no pasa `NewCase::validate`.
    pub fn open(id: CaseId, owner: &str, new: NewCase, today: NaiveDate) -> Result<Self, DomainError> {
        new.validate(today)?;
        let mut comments = CommentLog::default();
        comments.append(&CommentEntry::new(owner, today, "Processo iniciado pelo inspetor."));
        Ok(Case { id,
                  owner_id: owner.to_string(),
                  establishment: new.establishment.trim().to_string(),
                  cnpj: new.cnpj.trim().to_string(),
                  activity: new.activity.as_str().to_string(),
                  risk: new.risk.as_str().to_string(),
                  inspection_date: Some(new.inspection_date.unwrap_or(today)),
                  observations: new.observations,
                  inspector_due_date: Some(new.inspector_due_date
                                              .unwrap_or(today + Duration::days(DEFAULT_RETURN_DAYS))),
                  coordinator_due_date: None,
                  status: CaseStatus::InProgress,
                  comments,
                  completion_date: None })
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner_id == username
    }

    /// `InProgress -> Concluded`. Terminal: un caso concluido no vuelve atrás.
    pub fn conclude(&mut self, completion_date: NaiveDate, author: &str, today: NaiveDate) -> Result<(), DomainError> {
        self.ensure_in_progress()?;
        self.status = CaseStatus::Concluded;
        self.completion_date = Some(completion_date);
        self.comments.append(&CommentEntry::new(author, today, "Processo finalizado com sucesso."));
        Ok(())
    }

    /// Fija (o reemplaza) el plazo obligatorio de la coordinación. No agrega
    /// comentario: eso lo decide quien orquesta la acción.
    pub fn set_coordinator_due_date(&mut self, due: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
        self.ensure_in_progress()?;
        if due < today {
            return Err(DomainError::ValidationError(format!("prazo da coordenação {} anterior a hoje",
                                                            format_display(due))));
        }
        self.coordinator_due_date = Some(due);
        Ok(())
    }

    pub fn append_comment(&mut self, entry: &CommentEntry<'_>) {
        self.comments.append(entry);
    }

    fn ensure_in_progress(&self) -> Result<(), DomainError> {
        if self.status.is_in_progress() {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition(format!("processo {} está com situação '{}'", self.id, self.status)))
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<caso {}: {} ({}), {}>", self.id, self.establishment, self.owner_id, self.status)
    }
}
