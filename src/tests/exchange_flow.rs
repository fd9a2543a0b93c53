// Exercises the exchanger end to end over HTTP: allow-listing, expiry,
// and every rejection path in the forwarded-payload contract.

#[cfg(test)]
mod test {

    use std::net::SocketAddr;

    use jsonwebtoken::{decode, Algorithm, Validation};
    use serde_json::{json, Map, Value};
    use tokio::task::JoinHandle;

    use crate::exchange::routes;
    use crate::helpers::time::now_u64;
    use crate::tests::common::{
        build_reqwest_client, encode_payload, spawn_axum, test_decoding_key, test_issuer,
    };
    use crate::utils::constants::{
        FORWARDED_PAYLOAD_HEADER, INTERNAL_ISSUER, INTERNAL_TOKEN_HEADER, TOKEN_TTL_SECS,
    };

    async fn spawn_exchanger() -> (JoinHandle<()>, SocketAddr) {
        spawn_axum(routes::router(test_issuer())).await
    }

    fn decode_claims(token: &str) -> Map<String, Value> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[INTERNAL_ISSUER]);
        validation.validate_aud = false;

        decode::<Value>(token, &test_decoding_key(), &validation)
            .expect("token must verify against the test public key")
            .claims
            .as_object()
            .expect("claims must be a JSON object")
            .clone()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn exchange_returns_exactly_the_allowlisted_claims() {
        let (handle, addr) = spawn_exchanger().await;
        let client = build_reqwest_client();

        let payload = encode_payload(&json!({
            "sub": "alice",
            "preferred_username": "alice@example.com",
            "email": "alice@example.com",
            "roles": ["admin"],
            "iss": "https://external-idp.example.com"
        }));

        let before = now_u64();
        let resp = client
            .get(format!("http://{}/exchange/some/forwarded/path", addr))
            .header(FORWARDED_PAYLOAD_HEADER, payload)
            .send()
            .await
            .unwrap();
        let after = now_u64();

        assert_eq!(resp.status(), 200);
        let token = resp
            .headers()
            .get(INTERNAL_TOKEN_HEADER)
            .expect("token header must be present")
            .to_str()
            .unwrap()
            .to_owned();

        let claims = decode_claims(&token);

        // Exactly the allow-listed subset plus the standard bookkeeping.
        let mut keys: Vec<&str> = claims.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["exp", "iat", "iss", "preferred_username", "sub"]);

        assert_eq!(claims["iss"], INTERNAL_ISSUER);
        assert_eq!(claims["sub"], "alice");
        assert_eq!(claims["preferred_username"], "alice@example.com");

        let iat = claims["iat"].as_u64().unwrap();
        let exp = claims["exp"].as_u64().unwrap();
        assert_eq!(exp - iat, TOKEN_TTL_SECS);
        assert!(iat >= before && iat <= after);

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn missing_header_is_unauthorized_with_no_token() {
        let (handle, addr) = spawn_exchanger().await;
        let client = build_reqwest_client();

        let resp = client
            .get(format!("http://{}/exchange", addr))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 401);
        assert!(resp.headers().get(INTERNAL_TOKEN_HEADER).is_none());

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn invalid_base64_is_bad_request() {
        let (handle, addr) = spawn_exchanger().await;
        let client = build_reqwest_client();

        let resp = client
            .get(format!("http://{}/exchange", addr))
            .header(FORWARDED_PAYLOAD_HEADER, "%%%not-base64%%%")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        assert!(resp.headers().get(INTERNAL_TOKEN_HEADER).is_none());

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn invalid_json_is_bad_request() {
        let (handle, addr) = spawn_exchanger().await;
        let client = build_reqwest_client();

        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine;
        let not_json = URL_SAFE_NO_PAD.encode("this is not json");

        let resp = client
            .get(format!("http://{}/exchange", addr))
            .header(FORWARDED_PAYLOAD_HEADER, not_json)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        assert!(resp.headers().get(INTERNAL_TOKEN_HEADER).is_none());

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn missing_sub_is_bad_request() {
        let (handle, addr) = spawn_exchanger().await;
        let client = build_reqwest_client();

        let payload = encode_payload(&json!({"preferred_username": "bob"}));
        let resp = client
            .get(format!("http://{}/exchange", addr))
            .header(FORWARDED_PAYLOAD_HEADER, payload)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        assert!(resp.headers().get(INTERNAL_TOKEN_HEADER).is_none());

        handle.abort();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn repeated_exchanges_keep_claims_and_never_rewind_expiry() {
        let (handle, addr) = spawn_exchanger().await;
        let client = build_reqwest_client();

        let payload = encode_payload(&json!({
            "sub": "alice",
            "preferred_username": "alice@example.com"
        }));

        let mut decoded = Vec::new();
        for _ in 0..2 {
            let resp = client
                .get(format!("http://{}/exchange", addr))
                .header(FORWARDED_PAYLOAD_HEADER, payload.clone())
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            let token = resp
                .headers()
                .get(INTERNAL_TOKEN_HEADER)
                .unwrap()
                .to_str()
                .unwrap()
                .to_owned();
            decoded.push(decode_claims(&token));
        }

        assert_eq!(decoded[0]["sub"], decoded[1]["sub"]);
        assert_eq!(
            decoded[0]["preferred_username"],
            decoded[1]["preferred_username"]
        );
        // Signed at-or-after the first one; the signature may differ.
        assert!(decoded[1]["exp"].as_u64().unwrap() >= decoded[0]["exp"].as_u64().unwrap());

        handle.abort();
    }
}
