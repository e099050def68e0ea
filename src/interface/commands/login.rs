//! # Sign-in
//!
//! `login` sends an OAuth sign-in card; the channel then comes back with a
//! `signin/verifyState` invoke carrying a one-time code, handled here as well.

use anyhow::anyhow;

use crate::application::services::BotServices;
use crate::domain::error::{DispatchError, DispatchResult};
use crate::domain::traits::{CardStyle, CardSubject};
use crate::domain::types::{Activity, OutboundMessage};
use crate::strings::messages;

pub fn handle_login(services: &BotServices) -> Vec<OutboundMessage> {
    vec![OutboundMessage::card(services.cards.render(
        CardSubject::SignIn {
            connection_name: &services.config.bot.connection_name,
        },
        CardStyle::ThumbnailWithActions,
    ))]
}

/// Exchanges the magic code for a token and announces who signed in. Attempted once.
pub async fn handle_verification(
    services: &BotServices,
    activity: &Activity,
    code: Option<&str>,
) -> DispatchResult<Vec<OutboundMessage>> {
    let code = code.ok_or_else(|| DispatchError::validation("state", "missing"))?;

    let token = services
        .identity
        .exchange_code(&activity.from.id, &services.config.bot.connection_name, code)
        .await
        .map_err(DispatchError::Identity)?
        .ok_or_else(|| DispatchError::Identity(anyhow!("no token issued for the code")))?;

    let profile = services
        .identity
        .get_current_user(&token)
        .await
        .map_err(DispatchError::Identity)?;
    tracing::info!("User {} signed in as {}", activity.from.id, profile.display_name);

    Ok(vec![OutboundMessage::text(messages::signed_in(
        &profile.display_name,
        profile.mail.as_deref(),
    ))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, Fixture};

    #[test]
    fn login_card_uses_configured_connection() {
        let fixture = Fixture::new();
        let replies = handle_login(&fixture.services());
        assert_eq!(replies.len(), 1);
        assert!(replies[0].attachments[0]
            .content
            .to_string()
            .contains(&fixture.config.bot.connection_name));
    }

    #[tokio::test]
    async fn verified_code_announces_profile() {
        let fixture = Fixture::new();
        let activity = testing::invoke_activity("conv", "signin/verifyState", None);
        let replies = handle_verification(&fixture.services(), &activity, Some("123456"))
            .await
            .unwrap();
        assert_eq!(
            replies[0].text.as_deref(),
            Some(messages::signed_in("Megan Bowen", Some("megan@contoso.com")).as_str())
        );
        assert_eq!(fixture.identity.last_code.lock().unwrap().as_deref(), Some("123456"));
    }

    #[tokio::test]
    async fn missing_token_is_an_identity_failure() {
        let fixture = Fixture::new().without_token();
        let activity = testing::invoke_activity("conv", "signin/verifyState", None);
        let result = handle_verification(&fixture.services(), &activity, Some("123456")).await;
        assert!(matches!(result, Err(DispatchError::Identity(_))));
    }
}
