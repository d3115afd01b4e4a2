use crate::api::console_service::proto::{
    DeleteTopicCommand, DeleteTopicCommandResponse, DeleteTopicRecordsCommand,
    DeleteTopicRecordsCommandResponse, DescribeConsumerGroupQuery,
    DescribeConsumerGroupQueryResponse, DescribeConsumerGroupsQuery,
    DescribeConsumerGroupsQueryResponse, GetOverviewQuery, GetOverviewQueryResponse,
    ListConsumerGroupsQuery, ListConsumerGroupsQueryResponse,
};
use crate::api::converters::{
    delete_topic_records_to_proto_response, delete_topic_to_proto_response,
    describe_consumer_group_to_proto_response, describe_consumer_groups_to_proto_response,
    list_consumer_groups_to_proto_response, overview_to_proto_response,
    proto_delete_topic_records_to_internal, proto_delete_topic_to_internal,
    proto_describe_consumer_group_to_internal, proto_describe_consumer_groups_to_internal,
    proto_list_consumer_groups_to_internal,
};
use crate::error::ApplicationError;
use kafka_console::commands::delete_topic::delete_topic;
use kafka_console::commands::delete_topic_records::delete_topic_records;
use kafka_console::error::ConsoleError;
use kafka_console::gateway::BrokerGateway;
use kafka_console::hooks::{ensure_allowed, AuthorizationHooks};
use kafka_console::queries::describe_consumer_group::describe_consumer_group;
use kafka_console::queries::describe_consumer_groups::describe_consumer_groups;
use kafka_console::queries::get_overview::{get_overview, GetOverviewQueryInternal, OverviewSources};
use kafka_console::queries::list_consumer_groups::list_consumer_groups;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};
use tracing::debug;

pub mod proto {
    pub use console_service_server::*;
    tonic::include_proto!("kafka_console_api");

    pub(crate) const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("console_service_descriptor");
}

pub struct ConsoleService {
    gateway: Arc<dyn BrokerGateway>,
    overview_sources: OverviewSources,
    authorization: Arc<dyn AuthorizationHooks>,
    overview_timeout: Duration,
}

impl ConsoleService {
    pub fn new(
        overview_sources: OverviewSources,
        authorization: Arc<dyn AuthorizationHooks>,
        overview_timeout: Duration,
    ) -> Self {
        Self {
            gateway: overview_sources.gateway.clone(),
            overview_sources,
            authorization,
            overview_timeout,
        }
    }

    async fn can_see_consumer_group(&self, group_id: &str) -> Result<bool, ConsoleError> {
        self.authorization.can_see_consumer_group(group_id).await
    }
}

#[tonic::async_trait]
impl proto::ConsoleService for ConsoleService {
    #[tracing::instrument(skip_all)]
    async fn get_overview(
        &self,
        _request: Request<GetOverviewQuery>,
    ) -> Result<Response<GetOverviewQueryResponse>, Status> {
        let sources = self
            .overview_sources
            .visible_to(self.authorization.as_ref())
            .await
            .map_err(ApplicationError::from)?;

        let cancellation_token = CancellationToken::new();
        let _guard = cancellation_token.clone().drop_guard();

        let query = GetOverviewQueryInternal {
            timeout: self.overview_timeout,
        };
        let overview = get_overview(&sources, query, &cancellation_token).await;

        Ok(Response::new(overview_to_proto_response(overview)))
    }

    #[tracing::instrument(skip_all)]
    async fn list_consumer_groups(
        &self,
        request: Request<ListConsumerGroupsQuery>,
    ) -> Result<Response<ListConsumerGroupsQueryResponse>, Status> {
        let query = proto_list_consumer_groups_to_internal(request.into_inner());
        debug!("Mapped request: {:?}", query);

        let cancellation_token = CancellationToken::new();
        let _guard = cancellation_token.clone().drop_guard();

        let mut response = list_consumer_groups(&self.gateway, query, &cancellation_token)
            .await
            .map_err(ApplicationError::from)?;

        let mut visible_groups = Vec::with_capacity(response.groups.len());
        for group in response.groups {
            if self
                .can_see_consumer_group(&group.group_id)
                .await
                .map_err(ApplicationError::from)?
            {
                visible_groups.push(group);
            }
        }
        response.groups = visible_groups;

        Ok(Response::new(list_consumer_groups_to_proto_response(response)))
    }

    #[tracing::instrument(skip_all)]
    async fn describe_consumer_groups(
        &self,
        request: Request<DescribeConsumerGroupsQuery>,
    ) -> Result<Response<DescribeConsumerGroupsQueryResponse>, Status> {
        let query = proto_describe_consumer_groups_to_internal(request.into_inner())
            .map_err(ApplicationError::InvalidArgument)?;
        debug!("Mapped request: {:?}", query);

        for group_id in &query.groups {
            ensure_allowed(
                self.can_see_consumer_group(group_id).await,
                "view this consumer group",
                ("group_id", group_id),
            )
            .map_err(ApplicationError::from)?;
        }

        let cancellation_token = CancellationToken::new();
        let _guard = cancellation_token.clone().drop_guard();

        let response = describe_consumer_groups(&self.gateway, query, &cancellation_token)
            .await
            .map_err(ApplicationError::from)?;

        Ok(Response::new(describe_consumer_groups_to_proto_response(response)))
    }

    #[tracing::instrument(skip_all)]
    async fn describe_consumer_group(
        &self,
        request: Request<DescribeConsumerGroupQuery>,
    ) -> Result<Response<DescribeConsumerGroupQueryResponse>, Status> {
        let query = proto_describe_consumer_group_to_internal(request.into_inner())
            .map_err(ApplicationError::InvalidArgument)?;

        ensure_allowed(
            self.can_see_consumer_group(&query.group_id).await,
            "view this consumer group",
            ("group_id", &query.group_id),
        )
        .map_err(ApplicationError::from)?;

        let cancellation_token = CancellationToken::new();
        let _guard = cancellation_token.clone().drop_guard();

        let response = describe_consumer_group(&self.gateway, query, &cancellation_token)
            .await
            .map_err(ApplicationError::from)?;

        Ok(Response::new(describe_consumer_group_to_proto_response(response)))
    }

    #[tracing::instrument(skip_all)]
    async fn delete_topic(
        &self,
        request: Request<DeleteTopicCommand>,
    ) -> Result<Response<DeleteTopicCommandResponse>, Status> {
        let command = proto_delete_topic_to_internal(request.into_inner())
            .map_err(ApplicationError::InvalidArgument)?;

        ensure_allowed(
            self.authorization.can_delete_topic(&command.topic_name).await,
            "delete this topic",
            ("topic_name", &command.topic_name),
        )
        .map_err(ApplicationError::from)?;

        let cancellation_token = CancellationToken::new();
        let _guard = cancellation_token.clone().drop_guard();

        let response = delete_topic(&self.gateway, command, &cancellation_token)
            .await
            .map_err(ApplicationError::from)?;

        Ok(Response::new(delete_topic_to_proto_response(response)))
    }

    #[tracing::instrument(skip_all)]
    async fn delete_topic_records(
        &self,
        request: Request<DeleteTopicRecordsCommand>,
    ) -> Result<Response<DeleteTopicRecordsCommandResponse>, Status> {
        let command = proto_delete_topic_records_to_internal(request.into_inner())
            .map_err(ApplicationError::InvalidArgument)?;
        debug!("Mapped request: {:?}", command);

        ensure_allowed(
            self.authorization.can_delete_topic_records(&command.topic_name).await,
            "delete records of this topic",
            ("topic_name", &command.topic_name),
        )
        .map_err(ApplicationError::from)?;

        let cancellation_token = CancellationToken::new();
        let _guard = cancellation_token.clone().drop_guard();

        let response = delete_topic_records(&self.gateway, command, &cancellation_token)
            .await
            .map_err(ApplicationError::from)?;

        Ok(Response::new(delete_topic_records_to_proto_response(response)))
    }
}
