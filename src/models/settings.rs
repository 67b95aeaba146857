// src/models/settings.rs

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::FromRow;
use utoipa::ToSchema;

// Linha única de configuração do site (id é sempre TRUE no banco)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub id: bool,

    // Horários por dia da semana, ex: {"monday": {"open": 7, "close": 18}}
    #[schema(value_type = Object)]
    pub opening_hours: Value,

    #[schema(value_type = Object, example = json!({"instagram": "https://instagram.com/estudio"}))]
    pub social_links: Value,

    #[schema(value_type = Object, example = json!({"hero": "Bem-vinda ao estúdio!"}))]
    pub texts: Value,

    pub updated_at: DateTime<Utc>,
}

// Subconjunto exposto sem autenticação
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettings {
    #[schema(value_type = Object)]
    pub opening_hours: Value,
    #[schema(value_type = Object)]
    pub social_links: Value,
    #[schema(value_type = Object)]
    pub texts: Value,
}

impl From<Settings> for PublicSettings {
    fn from(s: Settings) -> Self {
        Self {
            opening_hours: s.opening_hours,
            social_links: s.social_links,
            texts: s.texts,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    #[schema(value_type = Option<Object>)]
    pub opening_hours: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub social_links: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub texts: Option<Value>,
}

// -------- Horário de funcionamento --------

/// Faixa de funcionamento de um dia, em horas cheias.
/// `open == close` representa dia fechado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    pub open: u32,
    pub close: u32,
}

impl DayHours {
    pub const CLOSED: DayHours = DayHours { open: 0, close: 0 };

    pub fn is_closed(&self) -> bool {
        self.open >= self.close
    }
}

/// Horário de funcionamento da semana inteira, indexado por dia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekHours {
    days: [DayHours; 7],
}

// Domingo fechado, seg-sex 7h às 18h, sábado 9h às 16h
const DEFAULT_WEEK: [DayHours; 7] = [
    DayHours { open: 7, close: 18 },  // segunda
    DayHours { open: 7, close: 18 },  // terça
    DayHours { open: 7, close: 18 },  // quarta
    DayHours { open: 7, close: 18 },  // quinta
    DayHours { open: 7, close: 18 },  // sexta
    DayHours { open: 9, close: 16 },  // sábado
    DayHours::CLOSED,                 // domingo
];

const DAY_KEYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

impl Default for WeekHours {
    fn default() -> Self {
        Self { days: DEFAULT_WEEK }
    }
}

impl WeekHours {
    /// Sobrepõe os padrões com o JSON de `settings.opening_hours`.
    /// Entradas ausentes ou malformadas caem no padrão do dia.
    pub fn from_settings(opening_hours: &Value) -> Self {
        let mut week = Self::default();

        let Some(obj) = opening_hours.as_object() else {
            return week;
        };

        for (idx, key) in DAY_KEYS.iter().enumerate() {
            let Some(entry) = obj.get(*key) else {
                continue;
            };

            if entry.get("closed").and_then(Value::as_bool) == Some(true) {
                week.days[idx] = DayHours::CLOSED;
                continue;
            }

            let open = entry.get("open").and_then(Value::as_u64);
            let close = entry.get("close").and_then(Value::as_u64);

            if let (Some(open), Some(close)) = (open, close) {
                if open <= close && close <= 24 {
                    week.days[idx] = DayHours {
                        open: open as u32,
                        close: close as u32,
                    };
                }
            }
        }

        week
    }

    pub fn for_weekday(&self, weekday: Weekday) -> DayHours {
        // Weekday::num_days_from_monday: segunda = 0 ... domingo = 6
        self.days[weekday.num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padrao_domingo_fechado_e_sabado_reduzido() {
        let week = WeekHours::default();
        assert!(week.for_weekday(Weekday::Sun).is_closed());
        assert_eq!(week.for_weekday(Weekday::Sat), DayHours { open: 9, close: 16 });
        assert_eq!(week.for_weekday(Weekday::Wed), DayHours { open: 7, close: 18 });
    }

    #[test]
    fn sobrepoe_dias_presentes_no_json() {
        let hours = json!({
            "monday": {"open": 9, "close": 18},
            "saturday": {"closed": true}
        });
        let week = WeekHours::from_settings(&hours);

        assert_eq!(week.for_weekday(Weekday::Mon), DayHours { open: 9, close: 18 });
        assert!(week.for_weekday(Weekday::Sat).is_closed());
        // Dia não mencionado permanece no padrão
        assert_eq!(week.for_weekday(Weekday::Tue), DayHours { open: 7, close: 18 });
    }

    #[test]
    fn entrada_malformada_cai_no_padrao() {
        let hours = json!({
            "monday": {"open": "cedo", "close": 18},
            "tuesday": {"open": 20, "close": 8},
            "friday": "fechado"
        });
        let week = WeekHours::from_settings(&hours);

        assert_eq!(week.for_weekday(Weekday::Mon), DayHours { open: 7, close: 18 });
        assert_eq!(week.for_weekday(Weekday::Tue), DayHours { open: 7, close: 18 });
        assert_eq!(week.for_weekday(Weekday::Fri), DayHours { open: 7, close: 18 });
    }

    #[test]
    fn json_nao_objeto_retorna_padrao() {
        assert_eq!(WeekHours::from_settings(&json!(null)), WeekHours::default());
        assert_eq!(WeekHours::from_settings(&json!([1, 2])), WeekHours::default());
    }
}
