use crate::error::{error_with_dynamic_message, KafkaProtocolError};
use crate::gateway::{BrokerId, BrokerMetadata, GatewayError, ProtocolItem};
use crate::sharding::ShardOutcome;
use getset::{CopyGetters, Getters};
use thiserror::Error;

/// Every shard outcome of one fan-out plus its failure accounting.
///
/// `requests_failed` counts transport failures only; items carrying a protocol error
/// code are filtered by the extraction helpers but stay in `outcomes`.
#[derive(Debug, Getters, CopyGetters)]
pub struct AggregatedResult<T> {
    #[getset(get = "pub")]
    outcomes: Vec<ShardOutcome<T>>,
    #[getset(get_copy = "pub")]
    requests_sent: usize,
    #[getset(get_copy = "pub")]
    requests_failed: usize,
}

impl<T> AggregatedResult<T> {
    pub fn from_outcomes(outcomes: Vec<ShardOutcome<T>>) -> Self {
        let requests_sent = outcomes.len();
        let requests_failed = outcomes.iter().filter(|outcome| outcome.is_failure()).count();

        Self {
            outcomes,
            requests_sent,
            requests_failed,
        }
    }

    pub fn is_total_failure(&self) -> bool {
        self.requests_sent > 0 && self.requests_failed == self.requests_sent
    }

    pub fn is_partial_failure(&self) -> bool {
        self.requests_failed > 0 && self.requests_failed < self.requests_sent
    }

    pub fn responses(&self) -> impl Iterator<Item = (&BrokerMetadata, &T)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.response().map(|response| (&outcome.broker, response)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&BrokerMetadata, &GatewayError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.error().map(|error| (&outcome.broker, error)))
    }

    pub fn last_error(&self) -> Option<&GatewayError> {
        self.outcomes.iter().rev().find_map(ShardOutcome::error)
    }

    pub fn items<'a, I, F>(&'a self, items_of: F) -> impl Iterator<Item = &'a I> + 'a
    where
        I: 'a,
        F: Fn(&'a T) -> &'a [I] + 'a,
    {
        self.responses().flat_map(move |(_, response)| items_of(response).iter())
    }

    pub fn succeeded_items<'a, I, F>(&'a self, items_of: F) -> impl Iterator<Item = &'a I> + 'a
    where
        I: ProtocolItem + 'a,
        F: Fn(&'a T) -> &'a [I] + 'a,
    {
        self.items(items_of).filter(|item| item.error_code() == 0)
    }

    pub fn rejected_items<'a, I, F>(
        &'a self,
        items_of: F,
    ) -> impl Iterator<Item = (&'a BrokerMetadata, &'a I)> + 'a
    where
        I: ProtocolItem + 'a,
        F: Fn(&'a T) -> &'a [I] + 'a,
    {
        self.responses().flat_map(move |(broker, response)| {
            items_of(response)
                .iter()
                .filter(|item| item.error_code() != 0)
                .map(move |item| (broker, item))
        })
    }

    pub fn broker_failures(&self) -> Vec<BrokerFailure> {
        self.failures()
            .map(|(broker, error)| BrokerFailure {
                broker_id: broker.node_id,
                error: error.to_string(),
            })
            .collect()
    }

    pub fn into_outcomes(self) -> Vec<ShardOutcome<T>> {
        self.outcomes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerFailure {
    pub broker_id: BrokerId,
    pub error: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FanOutError {
    #[error("no brokers available to send the request to")]
    NoTargets,

    #[error("all '{requests_sent}' requests have failed, last error: {last_error}")]
    AllFailed {
        requests_sent: usize,
        last_error: GatewayError,
    },
}

#[derive(Debug)]
pub struct FanOutFailure<T> {
    pub error: FanOutError,
    pub result: AggregatedResult<T>,
}

pub fn aggregate<T>(outcomes: Vec<ShardOutcome<T>>) -> Result<AggregatedResult<T>, FanOutFailure<T>> {
    let result = AggregatedResult::from_outcomes(outcomes);

    if result.requests_sent == 0 {
        return Err(FanOutFailure {
            error: FanOutError::NoTargets,
            result,
        });
    }

    if result.is_total_failure() {
        let last_error = result
            .last_error()
            .cloned()
            .unwrap_or(GatewayError::WorkerAborted);
        return Err(FanOutFailure {
            error: FanOutError::AllFailed {
                requests_sent: result.requests_sent,
                last_error,
            },
            result,
        });
    }

    Ok(result)
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SingleItemError {
    #[error("{what} response is empty, expected one item")]
    Empty { what: &'static str },

    #[error("{what} response contains {count} items, expected one")]
    Ambiguous { what: &'static str, count: usize },

    #[error(transparent)]
    Protocol(#[from] KafkaProtocolError),
}

pub fn single_item<I: ProtocolItem>(mut items: Vec<I>, what: &'static str) -> Result<I, SingleItemError> {
    match items.len() {
        0 => Err(SingleItemError::Empty { what }),
        1 => {
            let item = items.remove(0);
            match error_with_dynamic_message(item.error_code(), item.error_message()) {
                Some(error) => Err(SingleItemError::Protocol(error)),
                None => Ok(item),
            }
        }
        count => Err(SingleItemError::Ambiguous { what, count }),
    }
}

pub fn collapse_single<T, I, F>(
    result: AggregatedResult<T>,
    what: &'static str,
    items_of: F,
) -> Result<I, SingleItemError>
where
    I: ProtocolItem,
    F: Fn(T) -> Vec<I>,
{
    let items = result
        .into_outcomes()
        .into_iter()
        .filter_map(|outcome| outcome.result.ok())
        .flat_map(items_of)
        .collect();

    single_item(items, what)
}
