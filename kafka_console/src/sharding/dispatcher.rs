use crate::gateway::{
    AdminOperation, AdminRequest, BrokerGateway, BrokerId, BrokerMetadata, CoordinatorKey,
    GatewayError,
};
use std::future::Future;
use std::sync::Arc;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShardTargets {
    AllBrokers,
    Brokers(Vec<BrokerId>),
    CoordinatorOf(CoordinatorKey),
}

#[derive(Debug)]
pub struct ShardOutcome<T> {
    pub broker: BrokerMetadata,
    pub result: Result<T, GatewayError>,
}

impl<T> ShardOutcome<T> {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    pub fn response(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&GatewayError> {
        self.result.as_ref().err()
    }
}

/// Sends `operation` to every target concurrently and reports one outcome per target,
/// in arrival order.
///
/// Only a failure to resolve `AllBrokers` or `CoordinatorOf` targets is returned as an
/// error. Explicit broker ids always get an outcome: ids missing from the topology, or
/// ids that could not be looked up at all, are reported as failed outcomes.
pub async fn dispatch<O: AdminOperation>(
    gateway: &Arc<dyn BrokerGateway>,
    operation: O,
    targets: ShardTargets,
    cancellation_token: &CancellationToken,
) -> Result<Vec<ShardOutcome<O::Response>>, GatewayError> {
    let ResolvedTargets { brokers, unresolved } =
        resolve_targets(gateway, targets, cancellation_token).await?;

    let mut outcomes = dispatch_to_brokers(gateway, operation, brokers, cancellation_token).await;
    outcomes.extend(unresolved.into_iter().map(|(broker_id, error)| {
        warn!(broker_id, kind = %O::KIND, "Target broker could not be resolved: {error}");
        ShardOutcome {
            broker: BrokerMetadata::unknown(broker_id),
            result: Err(error),
        }
    }));

    Ok(outcomes)
}

pub async fn dispatch_to_brokers<O: AdminOperation>(
    gateway: &Arc<dyn BrokerGateway>,
    operation: O,
    brokers: Vec<BrokerMetadata>,
    cancellation_token: &CancellationToken,
) -> Vec<ShardOutcome<O::Response>> {
    let request: Arc<AdminRequest> = Arc::new(operation.into());
    debug!(kind = %O::KIND, shards = brokers.len(), "Dispatching sharded request");

    let results = fan_out(brokers, cancellation_token, |broker: BrokerMetadata| {
        let gateway = gateway.clone();
        let request = request.clone();
        async move {
            let response = gateway.send_to_broker(broker.node_id, &request).await?;
            O::response_from(response)
        }
    })
    .await;

    results
        .into_iter()
        .map(|(broker, result)| {
            if let Err(e) = &result {
                warn!(broker_id = broker.node_id, kind = %O::KIND, "Shard request failed: {e}");
            }
            ShardOutcome { broker, result }
        })
        .collect()
}

pub async fn send_routed<O: AdminOperation>(
    gateway: &Arc<dyn BrokerGateway>,
    operation: O,
    cancellation_token: &CancellationToken,
) -> Result<O::Response, GatewayError> {
    let request: AdminRequest = operation.into();
    debug!(kind = %O::KIND, "Sending client routed request");

    select! {
        biased;
        _ = cancellation_token.cancelled() => Err(GatewayError::Cancelled),
        response = gateway.send(&request) => O::response_from(response?),
    }
}

/// Runs `worker` for every target on its own task and waits for all of them.
///
/// Each worker owns its result slot. Cancelling the token makes every unfinished
/// worker report [`GatewayError::Cancelled`]; a worker that dies without reporting
/// is reported as [`GatewayError::WorkerAborted`]. The output always holds exactly
/// one entry per target.
pub async fn fan_out<K, T, E, F, Fut>(
    targets: Vec<K>,
    cancellation_token: &CancellationToken,
    worker: F,
) -> Vec<(K, Result<T, E>)>
where
    K: Clone,
    T: Send + 'static,
    E: From<GatewayError> + Send + 'static,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    if targets.is_empty() {
        return vec![];
    }

    let (tx, mut rx) = tokio::sync::mpsc::channel(targets.len());
    for (slot, target) in targets.iter().enumerate() {
        let tx = tx.clone();
        let token = cancellation_token.clone();
        let request = worker(target.clone());
        let task = async move {
            let result = select! {
                biased;
                _ = token.cancelled() => Err(E::from(GatewayError::Cancelled)),
                result = request => result,
            };
            let _ = tx.send((slot, result)).await;
        }
        .instrument(Span::current());

        tokio::task::spawn(task);
    }
    drop(tx);

    let mut reported = vec![false; targets.len()];
    let mut outcomes = Vec::with_capacity(targets.len());
    while let Some((slot, result)) = rx.recv().await {
        reported[slot] = true;
        outcomes.push((targets[slot].clone(), result));
    }

    for (target, reported) in targets.into_iter().zip(reported) {
        if !reported {
            outcomes.push((target, Err(E::from(GatewayError::WorkerAborted))));
        }
    }

    outcomes
}

struct ResolvedTargets {
    brokers: Vec<BrokerMetadata>,
    unresolved: Vec<(BrokerId, GatewayError)>,
}

async fn resolve_targets(
    gateway: &Arc<dyn BrokerGateway>,
    targets: ShardTargets,
    cancellation_token: &CancellationToken,
) -> Result<ResolvedTargets, GatewayError> {
    let lookup = async {
        match &targets {
            ShardTargets::AllBrokers | ShardTargets::Brokers(_) => {
                Ok(gateway.cluster_metadata().await?.brokers)
            }
            ShardTargets::CoordinatorOf(key) => Ok(vec![gateway.find_coordinator(key).await?]),
        }
    };

    let looked_up = select! {
        biased;
        looked_up = lookup => looked_up,
        _ = cancellation_token.cancelled() => Err(GatewayError::Cancelled),
    };

    match targets {
        ShardTargets::Brokers(broker_ids) => {
            let known = match looked_up {
                Ok(known) => known,
                Err(error) => {
                    return Ok(ResolvedTargets {
                        brokers: vec![],
                        unresolved: broker_ids
                            .into_iter()
                            .map(|broker_id| (broker_id, error.clone()))
                            .collect(),
                    })
                }
            };

            let mut brokers = Vec::with_capacity(broker_ids.len());
            let mut unresolved = vec![];
            for broker_id in broker_ids {
                match known.iter().find(|broker| broker.node_id == broker_id) {
                    Some(broker) => brokers.push(broker.clone()),
                    None => unresolved.push((broker_id, GatewayError::UnknownBroker(broker_id))),
                }
            }
            Ok(ResolvedTargets { brokers, unresolved })
        }
        ShardTargets::AllBrokers | ShardTargets::CoordinatorOf(_) => Ok(ResolvedTargets {
            brokers: looked_up?,
            unresolved: vec![],
        }),
    }
}
