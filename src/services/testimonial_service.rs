// src/services/testimonial_service.rs

use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, TestimonialRepository},
    models::testimonial::{
        SubmitTestimonialPayload, Testimonial, TestimonialFormInfo, TestimonialLinkInfo,
        TestimonialStatus,
    },
};

/// Token hexadecimal de 16 bytes aleatórios (32 caracteres). É a única
/// credencial do envio público, então a fonte precisa ser criptográfica.
pub fn generate_unique_link() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[derive(Clone)]
pub struct TestimonialService {
    testimonial_repo: TestimonialRepository,
    appointment_repo: AppointmentRepository,
    frontend_url: String,
}

impl TestimonialService {
    pub fn new(
        testimonial_repo: TestimonialRepository,
        appointment_repo: AppointmentRepository,
        frontend_url: String,
    ) -> Self {
        Self {
            testimonial_repo,
            appointment_repo,
            frontend_url,
        }
    }

    /// Gera o link de depoimento de um agendamento. Idempotente: se já
    /// existe um depoimento para o agendamento, devolve o existente.
    /// Retorna `true` quando o registro foi criado agora.
    pub async fn generate_link(
        &self,
        appointment_id: Uuid,
    ) -> Result<(Testimonial, bool), AppError> {
        let appointment = self
            .appointment_repo
            .find_detail(appointment_id)
            .await?
            .ok_or(AppError::NotFound("Agendamento não encontrado"))?;

        if let Some(existing) = self.testimonial_repo.find_by_appointment(appointment_id).await? {
            return Ok((existing, false));
        }

        let inserted = self
            .testimonial_repo
            .create_pending(
                appointment_id,
                &appointment.client.name,
                &appointment.client.phone,
                &generate_unique_link(),
            )
            .await?;

        match inserted {
            Some(testimonial) => Ok((testimonial, true)),
            // Outra requisição ganhou a corrida; devolve o link dela.
            None => self
                .testimonial_repo
                .find_by_appointment(appointment_id)
                .await?
                .map(|existing| (existing, false))
                .ok_or(AppError::NotFound("Link de depoimento não encontrado")),
        }
    }

    /// Monta o link público e a mensagem de WhatsApp para envio manual.
    pub async fn link_info(&self, appointment_id: Uuid) -> Result<TestimonialLinkInfo, AppError> {
        let testimonial = self
            .testimonial_repo
            .find_by_appointment(appointment_id)
            .await?
            .ok_or(AppError::NotFound("Link de depoimento não gerado"))?;

        let url = format!("{}/depoimento/{}", self.frontend_url, testimonial.unique_link);
        let whatsapp_message = format!(
            "Oi {}! Gostaria de saber sua opinião sobre o atendimento! \
             Deixe seu depoimento aqui: {} Obrigada!",
            testimonial.client_name, url
        );

        Ok(TestimonialLinkInfo {
            unique_link: testimonial.unique_link,
            url,
            whatsapp_message,
        })
    }

    /// Dados exibidos no formulário público, resolvidos pelo token.
    pub async fn form_info(&self, unique_link: &str) -> Result<TestimonialFormInfo, AppError> {
        let testimonial = self
            .testimonial_repo
            .find_by_link(unique_link)
            .await?
            .ok_or(AppError::NotFound("Link de depoimento inválido"))?;

        let appointment = self
            .appointment_repo
            .find_detail(testimonial.appointment_id)
            .await?
            .ok_or(AppError::NotFound("Agendamento não encontrado"))?;

        Ok(TestimonialFormInfo {
            client_name: testimonial.client_name,
            service_name: appointment.service.name,
            status: testimonial.status,
        })
    }

    /// Envio público do depoimento. Só transiciona de pending para
    /// published uma única vez; reenvios falham sem alterar nada.
    pub async fn submit(
        &self,
        unique_link: &str,
        payload: SubmitTestimonialPayload,
    ) -> Result<Testimonial, AppError> {
        let testimonial = self
            .testimonial_repo
            .find_by_link(unique_link)
            .await?
            .ok_or(AppError::NotFound("Link de depoimento inválido"))?;

        if testimonial.status != TestimonialStatus::Pending {
            return Err(AppError::TestimonialAlreadySubmitted);
        }

        // UPDATE condicionado ao status: se outro envio chegou antes,
        // nenhuma linha é afetada e o erro é o mesmo de reenvio.
        self.testimonial_repo
            .publish_if_pending(testimonial.id, payload.rating, &payload.text)
            .await?
            .ok_or(AppError::TestimonialAlreadySubmitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_tem_32_caracteres_hexadecimais() {
        let link = generate_unique_link();
        assert_eq!(link.len(), 32);
        assert!(link.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tokens_gerados_sao_distintos() {
        assert_ne!(generate_unique_link(), generate_unique_link());
    }
}
