use crate::gateway::GatewayError;
use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RequestKind {
    ListGroups,
    DescribeGroups,
    DescribeLogDirs,
    DeleteTopics,
    DeleteRecords,
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequestKind::ListGroups => "ListGroups",
            RequestKind::DescribeGroups => "DescribeGroups",
            RequestKind::DescribeLogDirs => "DescribeLogDirs",
            RequestKind::DeleteTopics => "DeleteTopics",
            RequestKind::DeleteRecords => "DeleteRecords",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub enum AdminRequest {
    ListGroups(ListGroupsRequest),
    DescribeGroups(DescribeGroupsRequest),
    DescribeLogDirs(DescribeLogDirsRequest),
    DeleteTopics(DeleteTopicsRequest),
    DeleteRecords(DeleteRecordsRequest),
}

#[derive(Debug, Clone)]
pub enum AdminResponse {
    ListGroups(ListGroupsResponse),
    DescribeGroups(DescribeGroupsResponse),
    DescribeLogDirs(DescribeLogDirsResponse),
    DeleteTopics(DeleteTopicsResponse),
    DeleteRecords(DeleteRecordsResponse),
}

impl AdminRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            AdminRequest::ListGroups(_) => RequestKind::ListGroups,
            AdminRequest::DescribeGroups(_) => RequestKind::DescribeGroups,
            AdminRequest::DescribeLogDirs(_) => RequestKind::DescribeLogDirs,
            AdminRequest::DeleteTopics(_) => RequestKind::DeleteTopics,
            AdminRequest::DeleteRecords(_) => RequestKind::DeleteRecords,
        }
    }
}

impl AdminResponse {
    pub fn kind(&self) -> RequestKind {
        match self {
            AdminResponse::ListGroups(_) => RequestKind::ListGroups,
            AdminResponse::DescribeGroups(_) => RequestKind::DescribeGroups,
            AdminResponse::DescribeLogDirs(_) => RequestKind::DescribeLogDirs,
            AdminResponse::DeleteTopics(_) => RequestKind::DeleteTopics,
            AdminResponse::DeleteRecords(_) => RequestKind::DeleteRecords,
        }
    }
}

pub trait AdminOperation: Into<AdminRequest> + Send + 'static {
    type Response: Send + 'static;

    const KIND: RequestKind;

    fn response_from(response: AdminResponse) -> Result<Self::Response, GatewayError>;
}

macro_rules! admin_operation {
    ($request:ident => $response:ident, $variant:ident) => {
        impl From<$request> for AdminRequest {
            fn from(value: $request) -> Self {
                AdminRequest::$variant(value)
            }
        }

        impl From<$response> for AdminResponse {
            fn from(value: $response) -> Self {
                AdminResponse::$variant(value)
            }
        }

        impl AdminOperation for $request {
            type Response = $response;

            const KIND: RequestKind = RequestKind::$variant;

            fn response_from(response: AdminResponse) -> Result<Self::Response, GatewayError> {
                match response {
                    AdminResponse::$variant(response) => Ok(response),
                    other => Err(GatewayError::UnexpectedResponse {
                        expected: Self::KIND,
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

admin_operation!(ListGroupsRequest => ListGroupsResponse, ListGroups);
admin_operation!(DescribeGroupsRequest => DescribeGroupsResponse, DescribeGroups);
admin_operation!(DescribeLogDirsRequest => DescribeLogDirsResponse, DescribeLogDirs);
admin_operation!(DeleteTopicsRequest => DeleteTopicsResponse, DeleteTopics);
admin_operation!(DeleteRecordsRequest => DeleteRecordsResponse, DeleteRecords);

pub trait ProtocolItem {
    fn error_code(&self) -> i16;

    fn error_message(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListGroupsRequest {
    pub states_filter: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListGroupsResponse {
    pub error_code: i16,
    pub groups: Vec<ListedGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedGroup {
    pub group_id: String,
    pub protocol_type: String,
    pub group_state: String,
}

impl ProtocolItem for ListGroupsResponse {
    fn error_code(&self) -> i16 {
        self.error_code
    }
}

#[derive(Debug, Clone, Default)]
pub struct DescribeGroupsRequest {
    pub groups: Vec<String>,
    pub include_authorized_operations: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DescribeGroupsResponse {
    pub groups: Vec<DescribedGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribedGroup {
    pub error_code: i16,
    pub group_id: String,
    pub state: String,
    pub protocol_type: String,
    pub protocol: String,
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMember {
    pub member_id: String,
    pub instance_id: Option<String>,
    pub client_id: String,
    pub client_host: String,
    pub assignments: Vec<MemberAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAssignment {
    pub topic: String,
    pub partitions: Vec<i32>,
}

impl ProtocolItem for DescribedGroup {
    fn error_code(&self) -> i16 {
        self.error_code
    }
}

#[derive(Debug, Clone, Default)]
pub struct DescribeLogDirsRequest {
    pub topics: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct DescribeLogDirsResponse {
    pub error_code: i16,
    pub dirs: Vec<LogDir>,
}

#[derive(Debug, Clone, Default)]
pub struct LogDir {
    pub error_code: i16,
    pub dir: String,
    pub topics: Vec<LogDirTopic>,
}

#[derive(Debug, Clone, Default)]
pub struct LogDirTopic {
    pub topic: String,
    pub partitions: Vec<LogDirPartition>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogDirPartition {
    pub partition: i32,
    pub size_bytes: i64,
    pub is_future: bool,
}

impl ProtocolItem for DescribeLogDirsResponse {
    fn error_code(&self) -> i16 {
        self.error_code
    }
}

impl ProtocolItem for LogDir {
    fn error_code(&self) -> i16 {
        self.error_code
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTopicsRequest {
    pub topic_names: Vec<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteTopicsResponse {
    pub topics: Vec<DeletedTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedTopic {
    pub topic: String,
    pub error_code: i16,
    pub error_message: Option<String>,
}

impl ProtocolItem for DeletedTopic {
    fn error_code(&self) -> i16 {
        self.error_code
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct DeleteRecordsRequest {
    pub topics: Vec<DeleteRecordsTopic>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DeleteRecordsTopic {
    pub topic: String,
    pub partitions: Vec<DeleteRecordsPartition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRecordsPartition {
    pub partition: i32,
    /// Records strictly before this offset are deleted.
    pub offset: i64,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteRecordsResponse {
    pub topics: Vec<DeleteRecordsTopicResult>,
}

#[derive(Debug, Clone)]
pub struct DeleteRecordsTopicResult {
    pub topic: String,
    pub partitions: Vec<DeleteRecordsPartitionResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRecordsPartitionResult {
    pub partition: i32,
    pub low_watermark: i64,
    pub error_code: i16,
}

impl ProtocolItem for DeleteRecordsPartitionResult {
    fn error_code(&self) -> i16 {
        self.error_code
    }
}

impl ProtocolItem for DeleteRecordsTopicResult {
    fn error_code(&self) -> i16 {
        0
    }
}
