pub mod boxsim_vis;
