mod users_repo;

pub use users_repo::UsersRepository;
