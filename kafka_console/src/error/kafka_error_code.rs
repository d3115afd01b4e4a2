use http::StatusCode;

macro_rules! kafka_error_codes {
    ($($variant:ident = $code:literal, $name:literal, $status:ident, $description:literal;)*) => {
        /// Kafka protocol error codes the console knows how to describe.
        ///
        /// See <https://kafka.apache.org/protocol#protocol_error_codes>
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum KafkaErrorCode {
            $($variant,)*
        }

        impl KafkaErrorCode {
            pub fn from_code(code: i16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub fn code(self) -> i16 {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $description,)*
                }
            }

            pub fn status_code(self) -> StatusCode {
                match self {
                    $(Self::$variant => StatusCode::$status,)*
                }
            }
        }
    };
}

kafka_error_codes! {
    UnknownServerError = -1, "UNKNOWN_SERVER_ERROR", INTERNAL_SERVER_ERROR,
        "The server experienced an unexpected error when processing the request.";
    OffsetOutOfRange = 1, "OFFSET_OUT_OF_RANGE", BAD_REQUEST,
        "The requested offset is not within the range of offsets maintained by the server.";
    CorruptMessage = 2, "CORRUPT_MESSAGE", INTERNAL_SERVER_ERROR,
        "This message has failed its CRC checksum, exceeds the valid size, has a null key for a compacted topic, or is otherwise corrupt.";
    UnknownTopicOrPartition = 3, "UNKNOWN_TOPIC_OR_PARTITION", NOT_FOUND,
        "This server does not host this topic-partition.";
    InvalidFetchSize = 4, "INVALID_FETCH_SIZE", BAD_REQUEST,
        "The requested fetch size is invalid.";
    LeaderNotAvailable = 5, "LEADER_NOT_AVAILABLE", SERVICE_UNAVAILABLE,
        "There is no leader for this topic-partition as we are in the middle of a leadership election.";
    NotLeaderOrFollower = 6, "NOT_LEADER_OR_FOLLOWER", SERVICE_UNAVAILABLE,
        "For requests intended only for the leader, this error indicates that the broker is not the current leader.";
    RequestTimedOut = 7, "REQUEST_TIMED_OUT", GATEWAY_TIMEOUT,
        "The request timed out.";
    BrokerNotAvailable = 8, "BROKER_NOT_AVAILABLE", SERVICE_UNAVAILABLE,
        "The broker is not available.";
    ReplicaNotAvailable = 9, "REPLICA_NOT_AVAILABLE", SERVICE_UNAVAILABLE,
        "The replica is not available for the requested topic-partition.";
    MessageTooLarge = 10, "MESSAGE_TOO_LARGE", BAD_REQUEST,
        "The request included a message larger than the max message size the server will accept.";
    NetworkException = 13, "NETWORK_EXCEPTION", SERVICE_UNAVAILABLE,
        "The server disconnected before a response was received.";
    CoordinatorLoadInProgress = 14, "COORDINATOR_LOAD_IN_PROGRESS", SERVICE_UNAVAILABLE,
        "The coordinator is loading and hence can't process requests.";
    CoordinatorNotAvailable = 15, "COORDINATOR_NOT_AVAILABLE", SERVICE_UNAVAILABLE,
        "The coordinator is not available.";
    NotCoordinator = 16, "NOT_COORDINATOR", SERVICE_UNAVAILABLE,
        "This is not the correct coordinator.";
    InvalidTopicException = 17, "INVALID_TOPIC_EXCEPTION", BAD_REQUEST,
        "The request attempted to perform an operation on an invalid topic.";
    InvalidGroupId = 24, "INVALID_GROUP_ID", BAD_REQUEST,
        "The configured groupId is invalid.";
    UnknownMemberId = 25, "UNKNOWN_MEMBER_ID", NOT_FOUND,
        "The coordinator is not aware of this member.";
    TopicAuthorizationFailed = 29, "TOPIC_AUTHORIZATION_FAILED", FORBIDDEN,
        "Topic authorization failed.";
    GroupAuthorizationFailed = 30, "GROUP_AUTHORIZATION_FAILED", FORBIDDEN,
        "Group authorization failed.";
    ClusterAuthorizationFailed = 31, "CLUSTER_AUTHORIZATION_FAILED", FORBIDDEN,
        "Cluster authorization failed.";
    UnsupportedVersion = 35, "UNSUPPORTED_VERSION", INTERNAL_SERVER_ERROR,
        "The version of API is not supported.";
    TopicAlreadyExists = 36, "TOPIC_ALREADY_EXISTS", CONFLICT,
        "Topic with this name already exists.";
    InvalidPartitions = 37, "INVALID_PARTITIONS", BAD_REQUEST,
        "Number of partitions is below 1.";
    InvalidReplicationFactor = 38, "INVALID_REPLICATION_FACTOR", BAD_REQUEST,
        "Replication factor is below 1 or larger than the number of available brokers.";
    InvalidReplicaAssignment = 39, "INVALID_REPLICA_ASSIGNMENT", BAD_REQUEST,
        "Replica assignment is invalid.";
    InvalidConfig = 40, "INVALID_CONFIG", BAD_REQUEST,
        "Configuration is invalid.";
    NotController = 41, "NOT_CONTROLLER", SERVICE_UNAVAILABLE,
        "This is not the correct controller for this cluster.";
    InvalidRequest = 42, "INVALID_REQUEST", BAD_REQUEST,
        "This most likely occurs because of a request being malformed by the client library or the message was sent to an incompatible broker.";
    PolicyViolation = 44, "POLICY_VIOLATION", BAD_REQUEST,
        "Request parameters do not satisfy the configured policy.";
    SaslAuthenticationFailed = 58, "SASL_AUTHENTICATION_FAILED", UNAUTHORIZED,
        "SASL Authentication failed.";
    NonEmptyGroup = 68, "NON_EMPTY_GROUP", CONFLICT,
        "The group is not empty.";
    GroupIdNotFound = 69, "GROUP_ID_NOT_FOUND", NOT_FOUND,
        "The group id does not exist.";
    TopicDeletionDisabled = 73, "TOPIC_DELETION_DISABLED", FORBIDDEN,
        "Topic deletion is disabled.";
    ThrottlingQuotaExceeded = 89, "THROTTLING_QUOTA_EXCEEDED", TOO_MANY_REQUESTS,
        "The throttling quota has been exceeded.";
}
