//! Score token codec.
//!
//! A score token is a compact HS256 JWS whose payload binds a game to the
//! Telegram user and message it was launched from:
//!
//! ```json
//! {"game":"tetris","user":42,"chat":-100123,"message":7}
//! {"game":"tetris","user":42,"imessage":"AgAAAP..."}
//! ```
//!
//! Exactly one of `message` / `imessage` is present. Tokens carry no expiry;
//! they are capabilities for one game message, not sessions.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ChatId, MessageId, MessageLocator, ScoreTarget, UserId},
    errors::Error,
    Result,
};

/// The only accepted signing algorithm.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Verified contents of a score token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireClaims", into = "WireClaims")]
pub struct ScoreClaims {
    pub game: String,
    pub target: ScoreTarget,
}

/// On-the-wire payload layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct WireClaims {
    game: String,
    user: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    imessage: Option<String>,
}

impl TryFrom<WireClaims> for ScoreClaims {
    type Error = String;

    fn try_from(w: WireClaims) -> std::result::Result<Self, Self::Error> {
        let locator = match (w.chat, w.message, w.imessage) {
            (Some(chat), Some(message), None) => MessageLocator::RegularMessage {
                chat_id: ChatId(chat),
                message_id: MessageId(message),
            },
            (None, None, Some(imessage)) if !imessage.is_empty() => {
                MessageLocator::InlineMessage(imessage)
            }
            _ => {
                return Err(
                    "payload must carry exactly one of chat+message or imessage".to_string(),
                )
            }
        };

        Ok(Self {
            game: w.game,
            target: ScoreTarget {
                user_id: UserId(w.user),
                locator,
            },
        })
    }
}

impl From<ScoreClaims> for WireClaims {
    fn from(c: ScoreClaims) -> Self {
        let (chat, message, imessage) = match c.target.locator {
            MessageLocator::RegularMessage {
                chat_id,
                message_id,
            } => (Some(chat_id.0), Some(message_id.0), None),
            MessageLocator::InlineMessage(id) => (None, None, Some(id)),
        };

        Self {
            game: c.game,
            user: c.target.user_id.0,
            chat,
            message,
            imessage,
        }
    }
}

/// Signs and verifies score tokens with a pre-shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn sign(&self, claims: &ScoreClaims) -> Result<String> {
        encode(&Header::new(TOKEN_ALGORITHM), claims, &self.encoding)
            .map_err(|e| Error::External(format!("failed to sign score token: {e}")))
    }

    /// Verify signature and algorithm, then decode the claims.
    ///
    /// Every failure maps to [`Error::Token`]; the message names the failure
    /// kind only and never echoes the token.
    pub fn verify(&self, token: &str) -> Result<ScoreClaims> {
        decode::<ScoreClaims>(token.trim(), &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let kind = match e.kind() {
                    ErrorKind::InvalidSignature => "invalid_signature",
                    ErrorKind::InvalidAlgorithm => "invalid_algorithm",
                    ErrorKind::Json(_) => "invalid_payload",
                    _ => "invalid_token",
                };
                Error::Token(kind.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular_claims() -> ScoreClaims {
        ScoreClaims {
            game: "tetris".to_string(),
            target: ScoreTarget {
                user_id: UserId(42),
                locator: MessageLocator::RegularMessage {
                    chat_id: ChatId(-100123),
                    message_id: MessageId(7),
                },
            },
        }
    }

    fn inline_claims() -> ScoreClaims {
        ScoreClaims {
            game: "tetris".to_string(),
            target: ScoreTarget {
                user_id: UserId(42),
                locator: MessageLocator::InlineMessage("AgAAAEx1".to_string()),
            },
        }
    }

    fn payload_json(token: &str) -> serde_json::Value {
        use base64::Engine;
        let payload = token.split('.').nth(1).unwrap();
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let codec = TokenCodec::new(b"test-secret");
        for claims in [regular_claims(), inline_claims()] {
            let token = codec.sign(&claims).unwrap();
            assert_eq!(token.split('.').count(), 3);
            assert_eq!(codec.verify(&token).unwrap(), claims);
        }
    }

    #[test]
    fn regular_payload_has_message_but_no_imessage() {
        let codec = TokenCodec::new(b"test-secret");
        let v = payload_json(&codec.sign(&regular_claims()).unwrap());
        assert_eq!(v["game"], "tetris");
        assert_eq!(v["user"], 42);
        assert_eq!(v["chat"], -100123);
        assert_eq!(v["message"], 7);
        assert!(v.get("imessage").is_none());
    }

    #[test]
    fn inline_payload_has_imessage_but_no_message() {
        let codec = TokenCodec::new(b"test-secret");
        let v = payload_json(&codec.sign(&inline_claims()).unwrap());
        assert_eq!(v["imessage"], "AgAAAEx1");
        assert!(v.get("message").is_none());
        assert!(v.get("chat").is_none());
    }

    #[test]
    fn flipped_signature_char_is_rejected() {
        let codec = TokenCodec::new(b"test-secret");
        let token = codec.sign(&regular_claims()).unwrap();
        let sig_start = token.rfind('.').unwrap() + 1;

        for idx in [sig_start, sig_start + 10, sig_start + 20] {
            let mut bytes = token.clone().into_bytes();
            bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert!(matches!(codec.verify(&tampered), Err(Error::Token(_))));
        }
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = TokenCodec::new(b"secret-A").sign(&regular_claims()).unwrap();
        match TokenCodec::new(b"secret-B").verify(&token) {
            Err(Error::Token(kind)) => assert_eq!(kind, "invalid_signature"),
            other => panic!("expected token error, got {other:?}"),
        }
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &regular_claims(),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        match TokenCodec::new(b"test-secret").verify(&token) {
            Err(Error::Token(kind)) => assert_eq!(kind, "invalid_algorithm"),
            other => panic!("expected token error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_rejected_without_panicking() {
        let codec = TokenCodec::new(b"test-secret");
        for token in ["", "abc", "a.b.c", "....", "eyJhbGciOiJIUzI1NiJ9..sig"] {
            assert!(matches!(codec.verify(token), Err(Error::Token(_))));
        }
    }

    #[test]
    fn payload_with_both_locators_is_rejected() {
        #[derive(Serialize)]
        struct Both {
            game: &'static str,
            user: i64,
            chat: i64,
            message: i32,
            imessage: &'static str,
        }

        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &Both {
                game: "tetris",
                user: 1,
                chat: 2,
                message: 3,
                imessage: "x",
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            TokenCodec::new(b"test-secret").verify(&token),
            Err(Error::Token(_))
        ));
    }
}
