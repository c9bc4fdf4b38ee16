use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        assignment::{AssignWorkerToBookingRequest, AssignmentSchedule, AssignmentTime},
        transitions::{ProcessWithdrawalRequest, SubscriptionAction, WithdrawalAction},
    },
    dto::{
        ads_banners::{CreateAdsBanner, UpdateAdsBanner},
        analytics::{
            MonthlyTasksReport, Period, PeriodicTasksReport, WorkerTaskFilters, WorkerTaskFiltersUpdate,
            WorkerKey, WorkerTaskRow, WorkerTaskTotals,
        },
        auth::{LoginRequest, SignupRequest},
        bookings::{AssignWorkerBody, BookingFilters, BookingFiltersUpdate, BookingPayload, BookingRow},
        house_types::{CreateHouseType, UpdateHouseType},
        subscriptions::{
            SubscriptionActionBody, SubscriptionFilters, SubscriptionFiltersUpdate, SubscriptionOrders,
            SubscriptionPayload, SubscriptionRow,
        },
        users::{UserFilters, UserFiltersUpdate, UserRow},
        withdrawals::{
            CreateWithdrawalRequest, ProcessActionBody, WithdrawalFilters, WithdrawalFiltersUpdate, WithdrawalRow,
            WithdrawalSortField, WithdrawalSummary,
        },
        workers::{
            AssignedJobs, CreateWorkerRequest, CurrentJob, JobHistory, UpdateWorkerRequest, WorkerCandidate,
            WorkerFilters, WorkerFiltersUpdate, WorkerRow,
        },
    },
    models::{
        Admin, AdsBanner, BankDetails, Booking, BookingStatus, BookingType, CleaningSubscription,
        CleaningSubscriptionStats, HouseType, Pagination, RecordId, SubscriptionOrder, SubscriptionStatus, User, Worker,
        WorkerJob, WithdrawalRequest, WithdrawalStats, WithdrawalStatus,
    },
    navigation::NavItem,
    response::{ApiResponse, Meta},
    routes::{
        ads_banners, analytics, auth, bookings, health, house_types, navigation, overview, params, subscriptions,
        users, withdrawals, workers,
    },
    session::SessionInfo,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::signup,
        auth::logout,
        auth::refresh,
        auth::session,
        overview::overview,
        navigation::navigation,
        users::list_users,
        users::update_filters,
        workers::list_workers,
        workers::update_filters,
        workers::create_worker,
        workers::get_worker,
        workers::update_worker,
        workers::delete_worker,
        workers::assigned_jobs,
        workers::current_job,
        workers::job_history,
        bookings::list_bookings,
        bookings::update_filters,
        bookings::create_booking,
        bookings::get_booking,
        bookings::update_booking,
        bookings::delete_booking,
        bookings::assignment_dialog,
        bookings::assign_worker,
        subscriptions::list_subscriptions,
        subscriptions::update_filters,
        subscriptions::subscription_stats,
        subscriptions::create_subscription,
        subscriptions::get_subscription,
        subscriptions::update_subscription,
        subscriptions::delete_subscription,
        subscriptions::subscription_orders,
        subscriptions::change_status,
        subscriptions::assign_worker,
        withdrawals::list_withdrawals,
        withdrawals::update_filters,
        withdrawals::withdrawal_stats,
        withdrawals::get_withdrawal,
        withdrawals::process_withdrawal,
        withdrawals::create_withdrawal,
        withdrawals::delete_withdrawal,
        house_types::list_house_types,
        house_types::create_house_type,
        house_types::update_house_type,
        house_types::delete_house_type,
        ads_banners::list_banners,
        ads_banners::create_banner,
        ads_banners::update_banner,
        ads_banners::delete_banner,
        analytics::worker_tasks,
        analytics::update_worker_task_filters,
        analytics::monthly_tasks,
        analytics::periodic_tasks,
        analytics::export_worker_tasks,
        analytics::export_monthly_tasks,
        analytics::export_periodic_tasks
    ),
    components(
        schemas(
            RecordId,
            Admin,
            User,
            Worker,
            WorkerJob,
            Booking,
            BookingStatus,
            BookingType,
            CleaningSubscription,
            CleaningSubscriptionStats,
            SubscriptionOrder,
            SubscriptionStatus,
            WithdrawalRequest,
            WithdrawalStats,
            WithdrawalStatus,
            BankDetails,
            HouseType,
            AdsBanner,
            Pagination,
            SessionInfo,
            NavItem,
            LoginRequest,
            SignupRequest,
            UserFilters,
            UserFiltersUpdate,
            UserRow,
            WorkerFilters,
            WorkerFiltersUpdate,
            WorkerRow,
            WorkerCandidate,
            CreateWorkerRequest,
            UpdateWorkerRequest,
            AssignedJobs,
            CurrentJob,
            JobHistory,
            BookingFilters,
            BookingFiltersUpdate,
            BookingPayload,
            BookingRow,
            AssignWorkerBody,
            AssignWorkerToBookingRequest,
            AssignmentSchedule,
            AssignmentTime,
            SubscriptionFilters,
            SubscriptionFiltersUpdate,
            SubscriptionRow,
            SubscriptionPayload,
            SubscriptionActionBody,
            SubscriptionAction,
            SubscriptionOrders,
            WithdrawalFilters,
            WithdrawalFiltersUpdate,
            WithdrawalSortField,
            WithdrawalSummary,
            WithdrawalRow,
            WithdrawalAction,
            ProcessActionBody,
            ProcessWithdrawalRequest,
            CreateWithdrawalRequest,
            CreateHouseType,
            UpdateHouseType,
            CreateAdsBanner,
            UpdateAdsBanner,
            WorkerTaskFilters,
            WorkerTaskFiltersUpdate,
            WorkerKey,
            WorkerTaskRow,
            WorkerTaskTotals,
            MonthlyTasksReport,
            PeriodicTasksReport,
            Period,
            params::PageQuery,
            params::SortOrder,
            auth::AuthOutcome,
            bookings::AssignmentDialog,
            subscriptions::SubscriptionView,
            subscriptions::StatusChange,
            withdrawals::WithdrawalsView,
            analytics::WorkerTasksView,
            overview::Overview,
            navigation::AdminIdentity,
            navigation::Navigation,
            health::HealthData,
            Meta,
            ApiResponse<SessionInfo>,
            ApiResponse<CleaningSubscriptionStats>,
            ApiResponse<WithdrawalStats>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Admin sign-in and session endpoints"),
        (name = "Overview", description = "Dashboard landing figures"),
        (name = "Navigation", description = "Sidebar layout"),
        (name = "Users", description = "Customer accounts"),
        (name = "Workers", description = "Worker accounts and jobs"),
        (name = "Bookings", description = "Bookings and worker assignment"),
        (name = "Cleaning Subscriptions", description = "Recurring cleaning plans"),
        (name = "Withdrawal Requests", description = "Worker payouts"),
        (name = "House Types", description = "Priced house configurations"),
        (name = "Ads Banners", description = "Promotional banners"),
        (name = "Analytics", description = "Reports and CSV exports"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
