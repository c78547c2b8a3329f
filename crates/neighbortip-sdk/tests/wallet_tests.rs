//! Wallet tests against a fake JSON-RPC endpoint

use axum::{extract::State, response::Json, routing::post, Router as AxumRouter};
use neighbortip_domain::Wei;
use neighbortip_sdk::{Connector, RpcWallet, Wallet, WalletError, WalletStatus};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const ACCOUNT: &str = "0x71c7656ec7ab88b098defb751b7401b5f6d8976f";

#[derive(Clone, Default)]
struct FakeNode {
    /// Answer eth_requestAccounts with "method not found"
    legacy: bool,
    /// Reject transactions as the user would
    reject_transactions: bool,
    calls: Arc<Mutex<Vec<Value>>>,
}

async fn rpc(State(node): State<FakeNode>, Json(request): Json<Value>) -> Json<Value> {
    node.calls.lock().unwrap().push(request.clone());
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();

    let outcome: Result<Value, (i64, &str)> = match method {
        "eth_requestAccounts" if node.legacy => Err((-32601, "Method not found")),
        "eth_requestAccounts" | "eth_accounts" => Ok(json!([ACCOUNT])),
        "eth_chainId" => Ok(json!("0x2105")),
        "personal_sign" => Ok(json!("0xsignature")),
        "eth_sendTransaction" if node.reject_transactions => {
            Err((4001, "User rejected the request."))
        }
        "eth_sendTransaction" => Ok(json!("0xtxhash")),
        _ => Err((-32601, "Method not found")),
    };

    Json(match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => {
            json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
        }
    })
}

async fn spawn_node(node: FakeNode) -> Connector {
    let app = AxumRouter::new().route("/", post(rpc)).with_state(node);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Connector {
        name: "local".to_string(),
        rpc_url: format!("http://{}/", addr),
    }
}

fn methods(node: &FakeNode) -> Vec<String> {
    node.calls
        .lock()
        .unwrap()
        .iter()
        .map(|c| c["method"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_connect_reads_account_and_chain() {
    let node = FakeNode::default();
    let mut wallet = RpcWallet::new(spawn_node(node.clone()).await);

    wallet.connect().await.unwrap();

    assert_eq!(
        wallet.status(),
        &WalletStatus::Connected {
            address: ACCOUNT.to_string(),
            chain_id: 8453
        }
    );
    assert_eq!(methods(&node), vec!["eth_requestAccounts", "eth_chainId"]);
}

#[tokio::test]
async fn test_connect_falls_back_to_eth_accounts() {
    let node = FakeNode {
        legacy: true,
        ..FakeNode::default()
    };
    let mut wallet = RpcWallet::new(spawn_node(node.clone()).await);

    wallet.connect().await.unwrap();

    assert!(wallet.status().is_connected());
    assert_eq!(
        methods(&node),
        vec!["eth_requestAccounts", "eth_accounts", "eth_chainId"]
    );
}

#[tokio::test]
async fn test_connect_failure_sets_error_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut wallet = RpcWallet::new(Connector {
        name: "offline".to_string(),
        rpc_url: format!("http://{}/", addr),
    });

    assert!(matches!(
        wallet.connect().await,
        Err(WalletError::Transport(_))
    ));
    assert!(matches!(wallet.status(), WalletStatus::Error(_)));
}

#[tokio::test]
async fn test_sign_message_hex_encodes_text() {
    let node = FakeNode::default();
    let mut wallet = RpcWallet::new(spawn_node(node.clone()).await);
    wallet.connect().await.unwrap();

    let signature = wallet.sign_message("Tip ur Neighbor").await.unwrap();

    assert_eq!(signature, "0xsignature");
    let calls = node.calls.lock().unwrap();
    let sign_call = calls.last().unwrap();
    assert_eq!(sign_call["method"], "personal_sign");
    assert_eq!(sign_call["params"][0], "0x546970207572204e65696768626f72");
    assert_eq!(sign_call["params"][1], ACCOUNT);
}

#[tokio::test]
async fn test_send_transaction() {
    let node = FakeNode::default();
    let mut wallet = RpcWallet::new(spawn_node(node.clone()).await);
    wallet.connect().await.unwrap();

    let hash = wallet
        .send_transaction(
            "0x000000000000000000000000000000000000000c",
            Wei::parse_ether("0.0000001").unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(hash, "0xtxhash");
    let calls = node.calls.lock().unwrap();
    let tx = &calls.last().unwrap()["params"][0];
    assert_eq!(tx["from"], ACCOUNT);
    assert_eq!(tx["to"], "0x000000000000000000000000000000000000000c");
    assert_eq!(tx["value"], "0x174876e800");
}

#[tokio::test]
async fn test_rejected_transaction_surfaces_message() {
    let node = FakeNode {
        reject_transactions: true,
        ..FakeNode::default()
    };
    let mut wallet = RpcWallet::new(spawn_node(node.clone()).await);
    wallet.connect().await.unwrap();

    let err = wallet
        .send_transaction("0xabc", Wei::from_wei(1))
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::Rpc { code: 4001, .. }));
    assert!(err.to_string().contains("User rejected the request."));
}

#[tokio::test]
async fn test_disconnect() {
    let node = FakeNode::default();
    let mut wallet = RpcWallet::new(spawn_node(node).await);
    wallet.connect().await.unwrap();

    wallet.disconnect().await;

    assert_eq!(wallet.status(), &WalletStatus::Disconnected);
    assert!(matches!(
        wallet.sign_message("hi").await,
        Err(WalletError::NotConnected)
    ));
}
